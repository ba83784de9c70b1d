use crate::error::{Error, Result};

/// Read `width` bits (0-32) MSB-first starting at absolute `bit_offset`
///
/// Pure function of its arguments: returns the value and the bit offset
/// just past the field.
pub fn read_bits_at(data: &[u8], bit_offset: usize, width: u8) -> Result<(u32, usize)> {
    if width > 32 {
        return Err(Error::InvalidBitWidth(width));
    }

    let total_bits = data.len() * 8;
    let available = total_bits.saturating_sub(bit_offset);
    if available < width as usize {
        return Err(Error::MalformedInput { bit_offset, needed: width, available });
    }

    let mut value = 0u32;
    let mut pos = bit_offset;
    let mut remaining = width as usize;

    // Take whole runs of bits from each byte rather than one bit at a time
    while remaining > 0 {
        let bit_in_byte = pos & 7;
        let bits_left_in_byte = 8 - bit_in_byte;
        let take = remaining.min(bits_left_in_byte);

        let shift = bits_left_in_byte - take;
        let mask = ((1u16 << take) - 1) as u8;
        let bits = (data[pos >> 3] >> shift) & mask;

        value = (value << take) | bits as u32;
        pos += take;
        remaining -= take;
    }

    Ok((value, pos))
}

/// Bit-level cursor over a packed buffer
///
/// Reads MSB-first, mirroring [`BitPacker`](super::BitPacker).
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Read `width` bits (0-32)
    #[inline]
    pub fn read_bits(&mut self, width: u8) -> Result<u32> {
        let (value, pos) = read_bits_at(self.data, self.pos, width)?;
        self.pos = pos;
        Ok(value)
    }

    /// Read a single bit
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Current bit position
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total bits in the underlying buffer
    pub fn total_bits(&self) -> usize {
        self.data.len() * 8
    }

    /// Bits left to read
    pub fn remaining(&self) -> usize {
        self.total_bits().saturating_sub(self.pos)
    }

    /// Whether the cursor is inside the final byte's zero padding
    ///
    /// True when fewer than 8 bits remain and all of them are zero. No token
    /// fits in fewer than 8 bits, so such a tail can only be flush padding.
    pub fn is_padding(&self) -> bool {
        let remaining = self.remaining();
        remaining < 8 && self.padding_bits() == 0
    }

    /// Value of the remaining bits when fewer than 8 are left
    pub(crate) fn padding_bits(&self) -> u8 {
        let remaining = self.remaining();
        if remaining == 0 || remaining >= 8 {
            return 0;
        }
        let last = self.data[self.data.len() - 1];
        last & ((1u8 << remaining) - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits_at_is_pure() {
        // 0xDE = 11011110, 0xAD = 10101101
        let data = [0xDE, 0xAD];

        assert_eq!(read_bits_at(&data, 0, 4).unwrap(), (0b1101, 4));
        assert_eq!(read_bits_at(&data, 4, 8).unwrap(), (0b1110_1010, 12));
        assert_eq!(read_bits_at(&data, 12, 4).unwrap(), (0b1101, 16));
        // Same arguments, same answer
        assert_eq!(read_bits_at(&data, 0, 4).unwrap(), (0b1101, 4));
    }

    #[test]
    fn test_read_bits_at_wide_fields() {
        let data = [0xFF, 0x00, 0xAB, 0xCD, 0xEF];
        assert_eq!(read_bits_at(&data, 0, 16).unwrap(), (0xFF00, 16));
        assert_eq!(read_bits_at(&data, 4, 16).unwrap(), (0xF00A, 20));
        assert_eq!(read_bits_at(&data, 8, 32).unwrap(), (0x00AB_CDEF, 40));
        assert_eq!(read_bits_at(&data, 3, 0).unwrap(), (0, 3));
    }

    #[test]
    fn test_read_past_end_is_error() {
        let data = [0xFF];
        assert!(matches!(
            read_bits_at(&data, 2, 7),
            Err(Error::MalformedInput { bit_offset: 2, needed: 7, available: 6 })
        ));
        assert!(matches!(
            read_bits_at(&data, 9, 1),
            Err(Error::MalformedInput { available: 0, .. })
        ));
        assert!(matches!(read_bits_at(&data, 0, 33), Err(Error::InvalidBitWidth(33))));
    }

    #[test]
    fn test_reader_cursor() {
        // 0xAB = 10101011
        let data = [0xAB, 0xCD];
        let mut reader = BitReader::new(&data);

        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(6).unwrap(), 0b101011);
        assert_eq!(reader.position(), 8);
        assert_eq!(reader.remaining(), 8);
        assert_eq!(reader.read_bits(8).unwrap(), 0xCD);
        assert_eq!(reader.remaining(), 0);
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_is_padding() {
        let data = [0b1010_0000];
        let mut reader = BitReader::new(&data);
        assert!(!reader.is_padding());

        reader.read_bits(3).unwrap();
        assert!(reader.is_padding());

        let data = [0b1010_0001];
        let mut reader = BitReader::new(&data);
        reader.read_bits(3).unwrap();
        assert!(!reader.is_padding());
        assert_eq!(reader.padding_bits(), 1);

        let empty: [u8; 0] = [];
        assert!(BitReader::new(&empty).is_padding());
    }

    #[test]
    fn test_mirrors_packer() {
        use crate::bits::BitPacker;

        let mut packer = BitPacker::new();
        packer.write_bit(false);
        packer.write_bits(4095, 12);
        packer.write_bits(63, 6);
        packer.write_bit(true);
        packer.write_bits(b'z' as u32, 8);
        let data = packer.finish();

        let mut reader = BitReader::new(&data);
        assert!(!reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(12).unwrap(), 4095);
        assert_eq!(reader.read_bits(6).unwrap(), 63);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(8).unwrap(), b'z' as u32);
        assert!(reader.is_padding());
    }
}
