use num_bigint::{BigInt, BigUint, Sign};
use tqutil_core::{UtilError, UtilResult};

use crate::alphabet::symbol;

/// Encodes bytes and non-negative integers as Crockford Base32 text.
///
/// Output is always the canonical uppercase alphabet, most significant digit
/// first, without padding. Zero encodes as `"0"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder;

impl Encoder {
    /// Encode a byte array read as an unsigned big-endian magnitude.
    ///
    /// An empty input yields an empty output.
    pub fn encode(&self, bytes: impl AsRef<[u8]>) -> Vec<u8> {
        let bytes = bytes.as_ref();
        if bytes.is_empty() {
            return Vec::new();
        }

        symbols(&BigUint::from_bytes_be(bytes))
    }

    pub fn encode_to_string(&self, bytes: impl AsRef<[u8]>) -> String {
        into_string(self.encode(bytes))
    }

    /// Encode an integer. Fails with `InvalidArgument` when it is negative.
    pub fn encode_number(&self, value: impl Into<BigInt>) -> UtilResult<Vec<u8>> {
        let value = value.into();
        if value.sign() == Sign::Minus {
            return Err(UtilError::InvalidArgument(format!(
                "cannot encode negative value {value}"
            )));
        }
        Ok(symbols(value.magnitude()))
    }

    pub fn encode_number_to_string(&self, value: impl Into<BigInt>) -> UtilResult<String> {
        self.encode_number(value).map(into_string)
    }
}

/// Base32 digits of `value`, most significant first; zero is `"0"`.
fn symbols(value: &BigUint) -> Vec<u8> {
    value.to_radix_be(32).into_iter().map(symbol).collect()
}

fn into_string(symbols: Vec<u8>) -> String {
    // The alphabet is pure ASCII.
    symbols.into_iter().map(char::from).collect()
}
