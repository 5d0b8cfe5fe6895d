use proptest::prelude::*;
use tqutil_base32::ALPHABET;
use tqutil_list::HeadTailList;

/// Canonical Base32 text, possibly empty, possibly with leading zeros.
pub fn base32_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(ALPHABET.to_vec()), 0..40)
        .prop_map(|symbols| symbols.into_iter().map(char::from).collect())
}

/// Base32 text sprinkled with lowercase symbols and the O/I/L aliases.
pub fn aliased_base32_text() -> impl Strategy<Value = String> {
    let symbols: Vec<u8> = ALPHABET
        .iter()
        .copied()
        .chain(ALPHABET.iter().map(u8::to_ascii_lowercase))
        .chain(*b"OoIiLl")
        .collect();
    prop::collection::vec(prop::sample::select(symbols), 1..40)
        .prop_map(|symbols| symbols.into_iter().map(char::from).collect())
}

/// Replace decode aliases with the digits they stand for.
pub fn canonicalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'O' | 'o' => '0',
            'I' | 'i' | 'L' | 'l' => '1',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

pub fn byte_vectors() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

pub fn small_lists() -> impl Strategy<Value = HeadTailList<i32>> {
    prop::collection::vec(-50i32..50, 0..30).prop_map(HeadTailList::from)
}
