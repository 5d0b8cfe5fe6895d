//! Time-sorted 64-bit identifiers.
//!
//! A [`Tsid`] packs a 42-bit millisecond timestamp (counted from
//! 2022-01-01T00:00:00Z), a 12-bit per-millisecond sequence and a 10-bit
//! node id. Its text form is `X` followed by 13 zero-padded Crockford
//! Base32 digits, so sorting the strings sorts the ids.

pub mod clock;
pub mod generator;
pub mod tsid;

use std::sync::OnceLock;

pub use clock::{Clock, ManualClock, SystemClock};
pub use generator::{ExhaustionPolicy, TsidGenerator, random_node};
pub use tsid::{
    BEGIN_OF_EPOCH_MILLIS, MAX_IDS_PER_MILLISECOND, MAX_NODES, PREFIX, TSID_SIZE, Tsid,
};

use tqutil_core::UtilResult;

static DEFAULT_GENERATOR: OnceLock<TsidGenerator> = OnceLock::new();

/// Generate an id from the process-wide generator, created on first use
/// from the environment configuration.
pub fn generate() -> UtilResult<Tsid> {
    DEFAULT_GENERATOR.get_or_init(TsidGenerator::new).generate()
}
