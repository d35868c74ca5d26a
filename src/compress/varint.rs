//! Base-128 variable-length integers used in the stream header.
//!
//! Seven bits per byte, least significant group first; the high bit marks
//! that another byte follows. A `u32` takes at most five bytes.

use crate::compress::error::{CompressError, CompressResult};

const MAX_LEN: usize = 5;

/// Append `value` to `out`, returning the number of bytes written
pub fn write_u32(out: &mut Vec<u8>, mut value: u32) -> usize {
    let start = out.len();
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
    out.len() - start
}

/// Read a value from the front of `data`, returning it with its encoded length
pub fn read_u32(data: &[u8]) -> CompressResult<(u32, usize)> {
    let mut value: u64 = 0;
    for (i, byte) in data.iter().take(MAX_LEN).enumerate() {
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return u32::try_from(value)
                .map(|v| (v, i + 1))
                .map_err(|_| CompressError::corrupted("length header overflows"));
        }
    }

    if data.len() < MAX_LEN {
        Err(CompressError::corrupted("truncated length header"))
    } else {
        Err(CompressError::corrupted("length header too long"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_widths() {
        for (value, width) in [(0u32, 1), (127, 1), (128, 2), (16_383, 2), (16_384, 3), (u32::MAX, 5)] {
            let mut out = Vec::new();
            assert_eq!(write_u32(&mut out, value), width);
            assert_eq!(read_u32(&out).unwrap(), (value, width));
        }
    }

    #[test]
    fn test_known_bytes() {
        let mut out = Vec::new();
        write_u32(&mut out, 300);
        assert_eq!(out, vec![0xac, 0x02]);
    }

    #[test]
    fn test_trailing_data_ignored() {
        assert_eq!(read_u32(&[0x03, 0xff, 0xff]).unwrap(), (3, 1));
    }

    #[test]
    fn test_malformed() {
        assert!(read_u32(&[]).is_err());
        assert!(read_u32(&[0x80, 0x80]).is_err());
        assert!(read_u32(&[0xff, 0xff, 0xff, 0xff, 0xff, 0x01]).is_err());
        // Fits in five bytes but exceeds u32
        assert!(read_u32(&[0xff, 0xff, 0xff, 0xff, 0x7f]).is_err());
    }
}
