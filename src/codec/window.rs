use crate::error::{Error, Result};

/// Append `length` bytes starting `offset` bytes back from the end of `out`
///
/// Length can exceed offset (run-length case): bytes are then appended one
/// at a time, so each new byte is available as the source of a later one.
pub fn copy_back(out: &mut Vec<u8>, offset: u16, length: u8) -> Result<()> {
    let distance = offset as usize;
    if distance == 0 || distance > out.len() {
        return Err(Error::InvalidBackReference { offset, available: out.len() });
    }

    let start = out.len() - distance;
    let length = length as usize;

    if length <= distance {
        out.extend_from_within(start..start + length);
    } else {
        out.reserve(length);
        for i in 0..length {
            let byte = out[start + i];
            out.push(byte);
        }
    }
    Ok(())
}
