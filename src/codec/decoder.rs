use super::window::copy_back;
use crate::error::{Error, Result};
use crate::format::{Token, TokenReader, MAX_MATCH};

/// Rebuilds the original bytes from a packed token stream
///
/// Without an expected length the stream ends at the final byte's zero
/// padding: fewer than 8 bits left, all zero. With
/// [`with_expected_len`](Self::with_expected_len) decoding stops as soon as
/// that many bytes exist, and anything but padding left over is an error.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    expected_len: Option<usize>,
}

impl Decoder {
    pub fn new() -> Self {
        Self { expected_len: None }
    }

    /// Decoder that checks the output against a length carried out-of-band
    pub fn with_expected_len(len: usize) -> Self {
        Self { expected_len: Some(len) }
    }

    pub fn expected_len(&self) -> Option<usize> {
        self.expected_len
    }

    pub fn decode(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        // Never trust the expected length beyond what the input could expand to
        let max_len = encoded.len().saturating_mul(MAX_MATCH * 8 / 19 + 1);
        let capacity = self.expected_len.unwrap_or(encoded.len() * 2).min(max_len);
        let mut output = Vec::with_capacity(capacity);

        let mut tokens = TokenReader::new(encoded);
        loop {
            if matches!(self.expected_len, Some(expected) if output.len() >= expected) {
                break;
            }

            let Some(token) = tokens.next() else {
                break;
            };

            match token? {
                Token::Literal(byte) => output.push(byte),
                Token::Match { offset, length } => copy_back(&mut output, offset, length)?,
            }
        }

        if let Some(expected) = self.expected_len {
            if output.len() != expected {
                return Err(Error::LengthMismatch { expected, found: output.len() });
            }
            if !tokens.at_padding() {
                return Err(Error::TrailingData { bits: tokens.remaining_bits() });
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::BitPacker;

    fn pack(tokens: &[Token]) -> Vec<u8> {
        let mut packer = BitPacker::new();
        for token in tokens {
            token.write(&mut packer);
        }
        packer.finish()
    }

    #[test]
    fn test_empty() {
        assert!(Decoder::new().decode(&[]).unwrap().is_empty());
        assert!(Decoder::with_expected_len(0).decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_literals_and_match() {
        let data = pack(&[
            Token::Literal(b'a'),
            Token::Literal(b'b'),
            Token::Literal(b'c'),
            Token::Match { offset: 3, length: 3 },
        ]);
        assert_eq!(Decoder::new().decode(&data).unwrap(), b"abcabc");
    }

    #[test]
    fn test_self_overlapping_match() {
        let data = pack(&[Token::Literal(b'a'), Token::Match { offset: 1, length: 9 }]);
        assert_eq!(Decoder::new().decode(&data).unwrap(), b"aaaaaaaaaa");
    }

    #[test]
    fn test_back_reference_before_start() {
        let data = pack(&[Token::Literal(b'a'), Token::Match { offset: 2, length: 3 }]);
        assert!(matches!(
            Decoder::new().decode(&data),
            Err(Error::InvalidBackReference { offset: 2, available: 1 })
        ));
    }

    #[test]
    fn test_truncated_stream() {
        let mut data = pack(&[Token::Literal(b'a'), Token::Match { offset: 1, length: 20 }]);
        // 28 bits -> 4 bytes; dropping the last byte cuts the match in half
        data.pop();
        assert!(matches!(Decoder::new().decode(&data), Err(Error::MalformedInput { .. })));
    }

    #[test]
    fn test_expected_len() {
        let data = pack(&[Token::Literal(b'x'), Token::Match { offset: 1, length: 5 }]);
        assert_eq!(Decoder::with_expected_len(6).decode(&data).unwrap(), b"xxxxxx");
        assert_eq!(Decoder::with_expected_len(6).expected_len(), Some(6));

        assert!(matches!(
            Decoder::with_expected_len(7).decode(&data),
            Err(Error::LengthMismatch { expected: 7, found: 6 })
        ));
        // Stops mid-match: the copy overshoots the declared length
        assert!(matches!(
            Decoder::with_expected_len(3).decode(&data),
            Err(Error::LengthMismatch { expected: 3, found: 6 })
        ));
    }

    #[test]
    fn test_expected_len_trailing_tokens() {
        let data = pack(&[Token::Literal(b'x'), Token::Literal(b'y')]);
        assert!(matches!(
            Decoder::with_expected_len(1).decode(&data),
            Err(Error::TrailingData { bits: 15 })
        ));
    }
}
