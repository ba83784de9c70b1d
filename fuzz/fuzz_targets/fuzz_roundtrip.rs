#![no_main]

use libfuzzer_sys::fuzz_target;
use lzpack::{compress, decompress, decompress_exact};

fuzz_target!(|data: &[u8]| {
    // Limit data size to avoid slowdowns
    let data = if data.len() > 16 * 1024 { &data[..16 * 1024] } else { data };

    let encoded = compress(data);

    // Literal-only encoding is the worst case
    assert!(encoded.len() <= (data.len() * 9 + 7) / 8);

    let decoded = decompress(&encoded).expect("decompress of compressed data failed");
    assert_eq!(decoded, data, "Round-trip mismatch");

    let exact = decompress_exact(&encoded, data.len()).expect("exact-length decompress failed");
    assert_eq!(exact, data, "Round-trip mismatch with expected length");
});
