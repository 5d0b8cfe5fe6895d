use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tqutil_base32::{Decoder, Encoder};
use tqutil_core::{UtilError, UtilResult};

/// 2022-01-01T00:00:00.000Z in milliseconds since the Unix epoch.
pub const BEGIN_OF_EPOCH_MILLIS: i64 = 1_640_995_200_000;

pub const TIMESTAMP_BITS: u32 = 42;
pub const SEQUENCE_BITS: u32 = 12;
pub use tqutil_core::config::{MAX_NODES, NODE_BITS};

pub const MAX_IDS_PER_MILLISECOND: u16 = 1 << SEQUENCE_BITS;
pub const MAX_TIMESTAMP: u64 = (1 << TIMESTAMP_BITS) - 1;

/// Length of the text form, prefix included.
pub const TSID_SIZE: usize = 14;

/// Leading character of the text form. A letter keeps the text usable as
/// an XML or HTML id.
pub const PREFIX: char = 'X';

const SEQUENCE_SHIFT: u32 = NODE_BITS;
const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + NODE_BITS;
const NODE_MASK: u64 = (1 << NODE_BITS) - 1;
const SEQUENCE_MASK: u64 = (1 << SEQUENCE_BITS) - 1;

/// Time-sorted identifier: `timestamp:42 | sequence:12 | node:10`.
///
/// Ordering, equality and hashing look at the packed value only. The text
/// form is fixed width, so it sorts the same way as the number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tsid(u64);

impl Tsid {
    pub(crate) fn from_parts(timestamp: u64, sequence: u16, node: u16) -> Self {
        Self(
            ((timestamp & MAX_TIMESTAMP) << TIMESTAMP_SHIFT)
                | ((sequence as u64 & SEQUENCE_MASK) << SEQUENCE_SHIFT)
                | (node as u64 & NODE_MASK),
        )
    }

    pub const fn from_long(value: i64) -> Self {
        Self(value as u64)
    }

    pub const fn as_long(self) -> i64 {
        self.0 as i64
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Milliseconds since [`BEGIN_OF_EPOCH_MILLIS`].
    pub const fn timestamp(self) -> u64 {
        self.0 >> TIMESTAMP_SHIFT
    }

    pub const fn sequence(self) -> u16 {
        ((self.0 >> SEQUENCE_SHIFT) & SEQUENCE_MASK) as u16
    }

    pub const fn node(self) -> u16 {
        (self.0 & NODE_MASK) as u16
    }

    pub fn created_at(self) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
            + TimeDelta::milliseconds(BEGIN_OF_EPOCH_MILLIS + self.timestamp() as i64)
    }
}

impl fmt::Display for Tsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = Encoder.encode_to_string(self.0.to_be_bytes());
        write!(f, "{PREFIX}{digits:0>width$}", width = TSID_SIZE - 1)
    }
}

impl fmt::Debug for Tsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tsid").field(&format_args!("{self}")).finish()
    }
}

impl FromStr for Tsid {
    type Err = UtilError;

    fn from_str(s: &str) -> UtilResult<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != TSID_SIZE {
            return Err(UtilError::Validation(format!(
                "TSID must be {TSID_SIZE} characters, got {}",
                bytes.len()
            )));
        }
        if !bytes[0].eq_ignore_ascii_case(&(PREFIX as u8)) {
            return Err(UtilError::Validation(format!(
                "TSID must start with '{PREFIX}': {s}"
            )));
        }
        Decoder.decode_to_u64(&bytes[1..]).map(Self)
    }
}

impl From<u64> for Tsid {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Tsid> for u64 {
    fn from(tsid: Tsid) -> Self {
        tsid.0
    }
}

impl From<Tsid> for i64 {
    fn from(tsid: Tsid) -> Self {
        tsid.as_long()
    }
}

impl Serialize for Tsid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tsid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_shares_node_width_with_config() {
        assert_eq!(TIMESTAMP_BITS + SEQUENCE_BITS + NODE_BITS, 64);
        assert_eq!(MAX_NODES, tqutil_core::MAX_NODES);
        assert_eq!(NODE_MASK + 1, MAX_NODES as u64);
    }

    #[test]
    fn packs_fields_high_to_low() {
        let tsid = Tsid::from_parts(1, 2, 3);
        assert_eq!(tsid.as_u64(), (1 << 22) | (2 << 10) | 3);
        assert_eq!(tsid.timestamp(), 1);
        assert_eq!(tsid.sequence(), 2);
        assert_eq!(tsid.node(), 3);
    }

    #[test]
    fn fields_are_masked() {
        let tsid = Tsid::from_parts(MAX_TIMESTAMP, MAX_IDS_PER_MILLISECOND - 1, MAX_NODES - 1);
        assert_eq!(tsid.as_u64(), u64::MAX);
        assert_eq!(tsid.as_long(), -1);
    }

    #[test]
    fn text_form_is_fixed_width() {
        assert_eq!(Tsid::from(0).to_string(), "X0000000000000");
        assert_eq!(Tsid::from(31).to_string(), "X000000000000Z");
        assert_eq!(Tsid::from(u64::MAX).to_string(), "XFZZZZZZZZZZZZ");
    }

    #[test]
    fn parses_own_text() {
        let tsid = Tsid::from_parts(123_456_789, 17, 512);
        let text = tsid.to_string();
        assert_eq!(text.len(), TSID_SIZE);
        assert_eq!(text.parse::<Tsid>().unwrap(), tsid);
        assert_eq!(text.to_lowercase().parse::<Tsid>().unwrap(), tsid);
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "X000", "Y0000000000000", "X00000000000U0", "XZZZZZZZZZZZZZ"] {
            let err = text.parse::<Tsid>().unwrap_err();
            assert!(matches!(err, UtilError::Validation(_)), "{text}: {err:?}");
        }
    }

    #[test]
    fn string_order_matches_numeric_order() {
        let values = [0u64, 1, 31, 32, 1 << 22, (1 << 22) + 1, 1 << 40, u64::MAX >> 1, u64::MAX];
        let tsids: Vec<Tsid> = values.iter().map(|&v| Tsid::from(v)).collect();
        for pair in tsids.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].to_string() < pair[1].to_string());
        }
    }

    #[test]
    fn created_at_counts_from_2022() {
        let start = Tsid::from_parts(0, 0, 0).created_at();
        assert_eq!(start.to_rfc3339(), "2022-01-01T00:00:00+00:00");
        let later = Tsid::from_parts(1_500, 0, 0).created_at();
        assert_eq!((later - start).num_milliseconds(), 1_500);
    }

    #[test]
    fn serde_uses_text_form() {
        let tsid = Tsid::from_parts(99, 1, 2);
        let json = serde_json::to_string(&tsid).unwrap();
        assert_eq!(json, format!("\"{tsid}\""));
        let back: Tsid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tsid);
        assert!(serde_json::from_str::<Tsid>("\"nope\"").is_err());
    }
}
