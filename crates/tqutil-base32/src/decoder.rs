use num_bigint::BigUint;
use tqutil_core::{UtilError, UtilResult};

use crate::alphabet::digit;

/// Decodes Crockford Base32 text.
///
/// Decoding is case-insensitive and accepts `O` for `0` and `I`/`L` for `1`.
/// Any other symbol outside the alphabet is rejected with `Validation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    /// Decode into the minimal unsigned big-endian byte sequence.
    ///
    /// Empty text yields no bytes; text denoting zero yields `[0]`.
    pub fn decode(&self, text: impl AsRef<[u8]>) -> UtilResult<Vec<u8>> {
        let text = text.as_ref();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.decode_to_number(text)?.to_bytes_be())
    }

    /// Decode into an unsigned integer. Empty text is zero.
    pub fn decode_to_number(&self, text: impl AsRef<[u8]>) -> UtilResult<BigUint> {
        let digits = text
            .as_ref()
            .iter()
            .enumerate()
            .map(|(pos, &c)| {
                digit(c).ok_or_else(|| {
                    UtilError::Validation(format!(
                        "invalid Base32 symbol {:?} at position {pos}",
                        char::from(c)
                    ))
                })
            })
            .collect::<UtilResult<Vec<u8>>>()?;
        BigUint::from_radix_be(&digits, 32)
            .ok_or_else(|| UtilError::Validation("Base32 digit out of range".to_string()))
    }

    /// Decode a value that must fit into 64 bits.
    pub fn decode_to_u64(&self, text: impl AsRef<[u8]>) -> UtilResult<u64> {
        let bytes = self.decode(text)?;
        if bytes.len() > 8 {
            return Err(UtilError::Validation(format!(
                "Base32 value of {} bytes does not fit 64 bits",
                bytes.len()
            )));
        }
        Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
    }

    /// Decode into bytes and read them as UTF-8 text.
    pub fn decode_to_string(&self, text: impl AsRef<[u8]>) -> UtilResult<String> {
        String::from_utf8(self.decode(text)?)
            .map_err(|e| UtilError::Validation(format!("decoded bytes are not UTF-8: {e}")))
    }
}
