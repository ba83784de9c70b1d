pub mod bits;
pub mod codec;
pub mod error;
pub mod format;
pub mod matcher;

pub use bits::{read_bits_at, BitPacker, BitReader};
pub use codec::{Decoder, ParallelEncoder, SingleThreadedEncoder};
pub use error::{Error, Result};
pub use format::{Token, TokenReader};
pub use matcher::SearchStrategy;

/// Configuration for compression
#[derive(Clone, Debug, Default)]
pub struct CompressConfig {
    /// Match finder; every strategy produces the same bytes
    pub search: SearchStrategy,
    /// Number of threads for match search (0 = auto, 1 = single-threaded)
    pub num_threads: usize,
}

/// Statistics from a compression run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompressStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
    /// Exact encoded size, excluding the final byte's padding
    pub output_bits: u64,
    pub literals: u64,
    pub matches: u64,
    /// Input bytes covered by match tokens
    pub matched_bytes: u64,
}

impl CompressStats {
    /// Output size as a fraction of input size (0.0 for empty input)
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Trait for the complete compression operation
pub trait Compressor {
    /// Compress `input` into a packed token stream
    fn compress(&mut self, input: &[u8]) -> Result<(Vec<u8>, CompressStats)>;
}

/// Compress `input` with the default configuration
///
/// Empty input yields empty output.
pub fn compress(input: &[u8]) -> Vec<u8> {
    SingleThreadedEncoder::new(CompressConfig::default()).encode(input).0
}

/// Compress `input`, choosing the encoder from `config.num_threads`
pub fn compress_with(input: &[u8], config: &CompressConfig) -> Result<(Vec<u8>, CompressStats)> {
    if config.num_threads == 1 {
        SingleThreadedEncoder::new(config.clone()).compress(input)
    } else {
        ParallelEncoder::new(config.clone()).compress(input)
    }
}

/// Decompress a packed token stream produced by [`compress`]
pub fn decompress(encoded: &[u8]) -> Result<Vec<u8>> {
    Decoder::new().decode(encoded)
}

/// Decompress, requiring exactly `len` output bytes
pub fn decompress_exact(encoded: &[u8], len: usize) -> Result<Vec<u8>> {
    Decoder::with_expected_len(len).decode(encoded)
}
