pub mod reader;
pub mod writer;

pub use reader::{read_bits_at, BitReader};
pub use writer::BitPacker;
