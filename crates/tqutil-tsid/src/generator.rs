use std::sync::atomic::{AtomicU64, Ordering};

use tqutil_core::{TsidConfig, UtilConfig, UtilError, UtilResult};

use crate::clock::{Clock, SystemClock};
use crate::tsid::{BEGIN_OF_EPOCH_MILLIS, MAX_IDS_PER_MILLISECOND, MAX_NODES, MAX_TIMESTAMP, Tsid};

/// What `generate` does once a millisecond has used all its sequence numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExhaustionPolicy {
    /// Spin until the clock reaches the next millisecond.
    #[default]
    Wait,
    /// Return `ResourceExhausted` right away.
    Fail,
}

/// Last handed-out `(timestamp << 12) | sequence`, or `UNSET` before the first id.
const UNSET: u64 = u64::MAX;

fn pack_state(timestamp: u64, sequence: u16) -> u64 {
    (timestamp << 12) | sequence as u64
}

fn unpack_state(state: u64) -> (u64, u16) {
    (state >> 12, (state & 0xFFF) as u16)
}

/// TSID generator for one node.
///
/// Ids from one generator strictly increase, also when the clock stalls or
/// steps backwards: the last used timestamp is kept and only the sequence
/// moves on until the clock catches up.
#[derive(Debug)]
pub struct TsidGenerator<C = SystemClock> {
    node: u16,
    policy: ExhaustionPolicy,
    clock: C,
    last: AtomicU64,
}

impl TsidGenerator<SystemClock> {
    /// Generator configured from the environment, with a random node when
    /// none (or an invalid one) is configured.
    pub fn new() -> Self {
        match UtilConfig::from_env() {
            Ok(config) => Self::from_config(&config.tsid),
            Err(e) => {
                tracing::warn!("Failed to read TSID configuration, using defaults: {e}");
                Self::from_config(&TsidConfig::default())
            }
        }
    }

    pub fn from_config(config: &TsidConfig) -> Self {
        let node = match config.node_id() {
            Some(node) => {
                tracing::debug!("TSID generator using configured node {node}");
                node
            }
            None => {
                let node = random_node();
                tracing::debug!("TSID generator using random node {node}");
                node
            }
        };
        let policy = if config.non_blocking {
            ExhaustionPolicy::Fail
        } else {
            ExhaustionPolicy::Wait
        };
        Self::build(node, SystemClock).with_policy(policy)
    }

    /// Fails with `InvalidArgument` unless `node < 1024`.
    pub fn with_node(node: u16) -> UtilResult<Self> {
        Self::with_clock(node, SystemClock)
    }
}

impl Default for TsidGenerator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TsidGenerator<C> {
    /// Fails with `InvalidArgument` unless `node < 1024`.
    pub fn with_clock(node: u16, clock: C) -> UtilResult<Self> {
        if node >= MAX_NODES {
            return Err(UtilError::InvalidArgument(format!(
                "node {node} out of range 0..{MAX_NODES}"
            )));
        }
        Ok(Self::build(node, clock))
    }

    fn build(node: u16, clock: C) -> Self {
        Self {
            node,
            policy: ExhaustionPolicy::default(),
            clock,
            last: AtomicU64::new(UNSET),
        }
    }

    pub fn with_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn node(&self) -> u16 {
        self.node
    }

    pub fn policy(&self) -> ExhaustionPolicy {
        self.policy
    }

    /// Generate the next id.
    ///
    /// Fails with `ResourceExhausted` when the sequence of the current
    /// millisecond is used up and the policy is [`ExhaustionPolicy::Fail`],
    /// or when the clock has run past the 42-bit timestamp range. A failed
    /// call leaves the generator untouched.
    pub fn generate(&self) -> UtilResult<Tsid> {
        loop {
            let now = self.elapsed_millis()?;
            let last = self.last.load(Ordering::Acquire);
            let (last_timestamp, last_sequence) = unpack_state(last);

            let (timestamp, sequence) = if last == UNSET || now > last_timestamp {
                (now, 0)
            } else if last_sequence + 1 < MAX_IDS_PER_MILLISECOND {
                (last_timestamp, last_sequence + 1)
            } else {
                match self.policy {
                    ExhaustionPolicy::Fail => {
                        return Err(UtilError::ResourceExhausted(format!(
                            "all {MAX_IDS_PER_MILLISECOND} ids for millisecond {last_timestamp} are used"
                        )));
                    }
                    ExhaustionPolicy::Wait => {
                        self.wait_past(last_timestamp)?;
                        continue;
                    }
                }
            };

            let next = pack_state(timestamp, sequence);
            if self
                .last
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return Ok(Tsid::from_parts(timestamp, sequence, self.node));
            }
        }
    }

    /// Milliseconds since the TSID epoch. A clock before the epoch reads as 0.
    fn elapsed_millis(&self) -> UtilResult<u64> {
        let elapsed = self.clock.now_millis().saturating_sub(BEGIN_OF_EPOCH_MILLIS);
        let elapsed = u64::try_from(elapsed).unwrap_or(0);
        if elapsed > MAX_TIMESTAMP {
            return Err(UtilError::ResourceExhausted(format!(
                "timestamp {elapsed} exceeds the 42-bit TSID range"
            )));
        }
        Ok(elapsed)
    }

    fn wait_past(&self, timestamp: u64) -> UtilResult<()> {
        tracing::trace!("TSID sequence exhausted at {timestamp}, waiting for the clock");
        while self.elapsed_millis()? <= timestamp {
            std::hint::spin_loop();
            std::thread::yield_now();
        }
        Ok(())
    }
}

/// A node id drawn from the thread-local CSPRNG.
pub fn random_node() -> u16 {
    rand::random::<u16>() & (MAX_NODES - 1)
}
