use super::constants::{
    FLAG_LITERAL, FLAG_MATCH, LENGTH_BITS, LITERAL_BITS, LITERAL_COST_BITS, MATCH_COST_BITS,
    OFFSET_BITS,
};
use crate::bits::{BitPacker, BitReader};
use crate::error::{Error, Result};
use std::fmt;

/// A single token in the packed stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A raw byte
    Literal(u8),
    /// A back-reference: copy `length` bytes starting `offset` bytes back
    Match { offset: u16, length: u8 },
}

impl Token {
    /// Build a match token, rejecting fields that do not fit the wire format
    pub fn new_match(offset: usize, length: usize) -> Result<Self> {
        if offset == 0 || offset >> OFFSET_BITS != 0 {
            return Err(Error::FieldOverflow { value: offset as u32, width: OFFSET_BITS });
        }
        if length >> LENGTH_BITS != 0 {
            return Err(Error::FieldOverflow { value: length as u32, width: LENGTH_BITS });
        }
        Ok(Token::Match { offset: offset as u16, length: length as u8 })
    }

    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { length, .. } => *length as usize,
        }
    }

    /// Encoded size in bits
    pub fn bit_cost(&self) -> usize {
        match self {
            Token::Literal(_) => LITERAL_COST_BITS,
            Token::Match { .. } => MATCH_COST_BITS,
        }
    }

    /// Append this token to the packer
    pub fn write(&self, packer: &mut BitPacker) {
        match *self {
            Token::Literal(byte) => {
                packer.write_bit(FLAG_LITERAL);
                packer.write_bits(byte as u32, LITERAL_BITS);
            }
            Token::Match { offset, length } => {
                packer.write_bit(FLAG_MATCH);
                packer.write_bits(offset as u32, OFFSET_BITS);
                packer.write_bits(length as u32, LENGTH_BITS);
            }
        }
    }

    /// Parse one token at the reader's position
    pub fn read(bits: &mut BitReader<'_>) -> Result<Self> {
        if bits.read_bit()? == FLAG_LITERAL {
            let byte = bits.read_bits(LITERAL_BITS)? as u8;
            Ok(Token::Literal(byte))
        } else {
            let offset = bits.read_bits(OFFSET_BITS)? as u16;
            let length = bits.read_bits(LENGTH_BITS)? as u8;
            Ok(Token::Match { offset, length })
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(byte) if byte.is_ascii_graphic() || *byte == b' ' => {
                write!(f, "LIT  {:#04x} '{}'", byte, *byte as char)
            }
            Token::Literal(byte) => write!(f, "LIT  {:#04x}", byte),
            Token::Match { offset, length } => write!(f, "COPY offset={} length={}", offset, length),
        }
    }
}

/// Iterates over the tokens of a packed buffer
///
/// Stops cleanly at the final byte's zero padding. Any error ends iteration.
pub struct TokenReader<'a> {
    bits: BitReader<'a>,
    finished: bool,
}

impl<'a> TokenReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { bits: BitReader::new(data), finished: false }
    }

    /// Bit position of the next token
    pub fn position(&self) -> usize {
        self.bits.position()
    }

    /// Whether only zero padding is left
    pub fn at_padding(&self) -> bool {
        self.bits.is_padding()
    }

    /// Bits left in the buffer, padding included
    pub fn remaining_bits(&self) -> usize {
        self.bits.remaining()
    }
}

impl Iterator for TokenReader<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.bits.is_padding() {
            self.finished = true;
            return None;
        }

        // Too short for any token but not zero: the stream was not produced by a flush
        if self.bits.remaining() < 8 {
            self.finished = true;
            return Some(Err(Error::NonZeroPadding { bits: self.bits.remaining() as u8 }));
        }

        let token = Token::read(&mut self.bits);
        if token.is_err() {
            self.finished = true;
        }
        Some(token)
    }
}
