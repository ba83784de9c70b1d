#![no_main]

use libfuzzer_sys::fuzz_target;
use lzpack::TokenReader;

fuzz_target!(|data: &[u8]| {
    let mut reader = TokenReader::new(data);
    let mut last_position = reader.position();

    while let Some(token) = reader.next() {
        let Ok(token) = token else {
            break;
        };

        // Every token consumes exactly its encoded size
        assert_eq!(reader.position() - last_position, token.bit_cost());
        last_position = reader.position();
    }
});
