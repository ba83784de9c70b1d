use crate::bits::BitPacker;
use crate::error::Result;
use crate::format::{Token, MAX_MATCH, MIN_MATCH, WINDOW_SIZE};
use crate::matcher::MatchCandidate;
use crate::{CompressConfig, CompressStats, Compressor};

/// Single-threaded greedy encoder
pub struct SingleThreadedEncoder {
    config: CompressConfig,
}

impl SingleThreadedEncoder {
    pub fn new(config: CompressConfig) -> Self {
        Self { config }
    }

    /// Encode `input`; this path cannot fail
    pub fn encode(&self, input: &[u8]) -> (Vec<u8>, CompressStats) {
        let mut finder = self.config.search.finder(0);
        encode_greedy(input, |pos| finder.find(input, pos))
    }
}

impl Compressor for SingleThreadedEncoder {
    fn compress(&mut self, input: &[u8]) -> Result<(Vec<u8>, CompressStats)> {
        Ok(self.encode(input))
    }
}

/// Greedy parse: take the best match at each position if it is long enough,
/// otherwise emit a literal
///
/// `best_at` is called once for every position the parse lands on, in
/// increasing order.
pub(crate) fn encode_greedy<F>(input: &[u8], mut best_at: F) -> (Vec<u8>, CompressStats)
where
    F: FnMut(usize) -> MatchCandidate,
{
    let mut stats = CompressStats { input_bytes: input.len() as u64, ..Default::default() };
    if input.is_empty() {
        return (Vec::new(), stats);
    }

    // Literal-only worst case is 9 bits per byte
    let mut packer = BitPacker::with_capacity(input.len() + input.len() / 8 + 1);
    let mut pos = 0;

    while pos < input.len() {
        let best = best_at(pos);

        let token = if best.length >= MIN_MATCH {
            debug_assert!(best.offset >= 1 && best.offset <= WINDOW_SIZE);
            debug_assert!(best.length <= MAX_MATCH);
            stats.matches += 1;
            stats.matched_bytes += best.length as u64;
            Token::Match { offset: best.offset as u16, length: best.length as u8 }
        } else {
            stats.literals += 1;
            Token::Literal(input[pos])
        };

        token.write(&mut packer);
        pos += token.uncompressed_size();
    }

    stats.output_bits = packer.bit_len() as u64;
    let output = packer.finish();
    stats.output_bytes = output.len() as u64;

    (output, stats)
}
