#![no_main]

use libfuzzer_sys::fuzz_target;
use lzpack::{decompress, decompress_exact};

fuzz_target!(|data: &[u8]| {
    // Decoding may fail on arbitrary input - that's OK
    // We're looking for panics/crashes, not errors
    let _ = decompress(data);

    if let Some((&len, rest)) = data.split_first() {
        let _ = decompress_exact(rest, len as usize * 4);
    }
});
