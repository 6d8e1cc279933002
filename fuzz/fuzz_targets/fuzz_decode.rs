#![no_main]

use libfuzzer_sys::fuzz_target;
use versefind::codec::{decode, decode_with, encode, DecodeOptions};

fuzz_target!(|data: &str| {
    let passages = decode(data);

    // Decoded text lines are never markers, so they always encode again
    let encoded = encode(&passages).expect("decoded passages must be encodable");
    assert_eq!(decode(&encoded).len(), passages.len());

    let _ = decode_with(data, DecodeOptions { strict: true });
});
