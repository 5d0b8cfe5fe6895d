//! Crockford Base32 encoding.
//!
//! The alphabet is `0123456789ABCDEFGHJKMNPQRSTVWXYZ`. Encoding always emits
//! uppercase symbols; decoding ignores case and maps `O` to `0` and `I`/`L`
//! to `1`. Values are treated as unsigned big-endian magnitudes, so leading
//! zero bytes are not preserved.

pub mod alphabet;
pub mod decoder;
pub mod encoder;

pub use alphabet::{ALPHABET, is_valid_symbol};
pub use decoder::Decoder;
pub use encoder::Encoder;

use tqutil_core::UtilResult;

pub fn encoder() -> Encoder {
    Encoder
}

pub fn decoder() -> Decoder {
    Decoder
}

/// Shorthand for [`Encoder::encode`].
pub fn encode(bytes: impl AsRef<[u8]>) -> Vec<u8> {
    Encoder.encode(bytes)
}

/// Shorthand for [`Encoder::encode_to_string`].
pub fn encode_to_string(bytes: impl AsRef<[u8]>) -> String {
    Encoder.encode_to_string(bytes)
}

/// Shorthand for [`Decoder::decode`].
pub fn decode(text: impl AsRef<[u8]>) -> UtilResult<Vec<u8>> {
    Decoder.decode(text)
}
