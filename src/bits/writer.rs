use crate::error::{Error, Result};

/// Bit-level writer for the packed token stream
///
/// Writes bits MSB-first: the first bit written to a byte lands in bit 7.
pub struct BitPacker {
    /// Completed output bytes
    output: Vec<u8>,
    /// Current byte being built
    current_byte: u8,
    /// Bits written to current byte (0-7)
    bits_in_byte: u8,
}

impl BitPacker {
    pub fn new() -> Self {
        Self { output: Vec::new(), current_byte: 0, bits_in_byte: 0 }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { output: Vec::with_capacity(capacity), current_byte: 0, bits_in_byte: 0 }
    }

    /// Write a single bit
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.current_byte |= 1 << (7 - self.bits_in_byte);
        }
        self.bits_in_byte += 1;

        if self.bits_in_byte == 8 {
            self.output.push(self.current_byte);
            self.current_byte = 0;
            self.bits_in_byte = 0;
        }
    }

    /// Write the low `width` bits (0-32) of `value`, most significant first
    ///
    /// Bits of `value` above `width` are dropped.
    pub fn write_bits(&mut self, value: u32, width: u8) {
        debug_assert!(width <= 32);
        debug_assert!(fits(value, width), "{value} does not fit in {width} bits");

        for i in (0..width.min(32)).rev() {
            self.write_bit((value >> i) & 1 != 0);
        }
    }

    /// Like [`write_bits`](Self::write_bits), but rejects values that do not fit
    pub fn write_bits_checked(&mut self, value: u32, width: u8) -> Result<()> {
        if width > 32 {
            return Err(Error::InvalidBitWidth(width));
        }
        if !fits(value, width) {
            return Err(Error::FieldOverflow { value, width });
        }
        self.write_bits(value, width);
        Ok(())
    }

    /// Pad the pending partial byte with zero bits and emit it
    pub fn flush(&mut self) {
        if self.bits_in_byte > 0 {
            self.output.push(self.current_byte);
            self.current_byte = 0;
            self.bits_in_byte = 0;
        }
    }

    /// Finish and return the output bytes
    pub fn finish(mut self) -> Vec<u8> {
        self.flush();
        self.output
    }

    /// Exact number of bits written, excluding padding
    pub fn bit_len(&self) -> usize {
        self.output.len() * 8 + self.bits_in_byte as usize
    }

    /// Get current output length in bytes (including partial byte)
    pub fn len(&self) -> usize {
        self.output.len() + if self.bits_in_byte > 0 { 1 } else { 0 }
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.output.is_empty() && self.bits_in_byte == 0
    }

    /// Completed bytes only; a pending partial byte is not included
    pub fn bytes(&self) -> &[u8] {
        &self.output
    }

    /// Clear the packer for reuse
    pub fn clear(&mut self) {
        self.output.clear();
        self.current_byte = 0;
        self.bits_in_byte = 0;
    }
}

impl Default for BitPacker {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn fits(value: u32, width: u8) -> bool {
    width >= 32 || value >> width == 0
}
