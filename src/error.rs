use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors (CLI paths only)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Bit-level errors
    #[error("Malformed input: need {needed} bits at bit offset {bit_offset}, only {available} available")]
    MalformedInput { bit_offset: usize, needed: u8, available: usize },

    #[error("Value {value} does not fit in {width} bits")]
    FieldOverflow { value: u32, width: u8 },

    #[error("Invalid bit width: {0} (max 32)")]
    InvalidBitWidth(u8),

    // Token stream errors
    #[error("Back-reference offset {offset} exceeds available output {available}")]
    InvalidBackReference { offset: u16, available: usize },

    #[error("Final byte carries {bits} non-zero padding bits")]
    NonZeroPadding { bits: u8 },

    #[error("Length mismatch: expected {expected} bytes, got {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("{bits} bits of token data remain after the expected end of output")]
    TrailingData { bits: usize },

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
