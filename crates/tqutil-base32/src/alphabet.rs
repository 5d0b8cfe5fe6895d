/// Crockford's Base32 alphabet (excludes I, L, O, U).
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const INVALID: u8 = 0xFF;

/// ASCII symbol to digit value; `INVALID` for anything outside the table.
static DECODE_TABLE: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        let symbol = ALPHABET[i];
        table[symbol as usize] = i as u8;
        table[symbol.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }

    // Decode-only aliases for the excluded letters.
    table[b'O' as usize] = 0;
    table[b'o' as usize] = 0;
    table[b'I' as usize] = 1;
    table[b'i' as usize] = 1;
    table[b'L' as usize] = 1;
    table[b'l' as usize] = 1;
    table
}

/// The canonical symbol for a digit in `[0, 31]`.
#[inline]
pub(crate) fn symbol(digit: u8) -> u8 {
    ALPHABET[(digit & 0x1F) as usize]
}

/// The digit value of a symbol, accepting lowercase and the O/I/L aliases.
#[inline]
pub fn digit(symbol: u8) -> Option<u8> {
    match DECODE_TABLE.get(symbol as usize) {
        Some(&INVALID) | None => None,
        Some(&value) => Some(value),
    }
}

pub fn is_valid_symbol(symbol: u8) -> bool {
    digit(symbol).is_some()
}
