use tqutil_base32::Decoder;
use tqutil_tsid::{PREFIX, TSID_SIZE, Tsid};

/// Assert `text` has the TSID shape and decodes back to `tsid`.
pub fn assert_tsid_text(tsid: Tsid, text: &str) {
    assert_eq!(text.len(), TSID_SIZE, "TSID text has wrong length: {text}");
    assert!(text.starts_with(PREFIX), "TSID text lacks prefix: {text}");
    let value = Decoder
        .decode_to_u64(&text[1..])
        .unwrap_or_else(|e| panic!("TSID body of {text} does not decode: {e}"));
    assert_eq!(value, tsid.as_u64(), "TSID text {text} decodes to another value");
}

/// Assert ids are non-decreasing and their text forms sort the same way.
pub fn assert_sorted_consistently(ids: &[Tsid]) {
    for pair in ids.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "TSIDs out of order: {:?} > {:?}",
            pair[0],
            pair[1]
        );
        assert!(
            pair[0].to_string() <= pair[1].to_string(),
            "TSID texts out of order: {} > {}",
            pair[0],
            pair[1]
        );
    }
}
