pub mod assertions;
pub mod strategies;

pub use assertions::{assert_sorted_consistently, assert_tsid_text};
pub use strategies::{
    aliased_base32_text, base32_text, byte_vectors, canonicalize, small_lists,
};
