/// Largest back-reference distance (fits the 12-bit offset field)
pub const WINDOW_SIZE: usize = 4095;

/// Longest copy a single match token can describe (fits the 6-bit length field)
pub const MAX_MATCH: usize = 63;

/// Shortest match worth emitting
///
/// A match costs 19 bits; two literals cost 18, three cost 27.
pub const MIN_MATCH: usize = 3;

/// Flag bit preceding a literal byte
pub const FLAG_LITERAL: bool = true;

/// Flag bit preceding an (offset, length) pair
pub const FLAG_MATCH: bool = false;

pub const FLAG_BITS: u8 = 1;
pub const LITERAL_BITS: u8 = 8;
pub const OFFSET_BITS: u8 = 12;
pub const LENGTH_BITS: u8 = 6;

/// Encoded size of a literal token in bits
pub const LITERAL_COST_BITS: usize = (FLAG_BITS + LITERAL_BITS) as usize;

/// Encoded size of a match token in bits
pub const MATCH_COST_BITS: usize = (FLAG_BITS + OFFSET_BITS + LENGTH_BITS) as usize;
