//! Size arithmetic for packed bit storage
//!
//! Pure functions with overflow protection; no allocation happens here.

use crate::format::constants::BITS_PER_REACTION;
use crate::LtcsError;

/// Number of bytes needed to hold `bit_count` bits
pub const fn byte_len_for(bit_count: usize) -> usize {
    bit_count.div_ceil(8)
}

/// Number of bits needed to encode `reactions` sign slots
pub const fn encoded_bit_count(reactions: usize) -> Result<usize, LtcsError> {
    match reactions.checked_mul(BITS_PER_REACTION) {
        Some(bits) => Ok(bits),
        None => Err(LtcsError::SizeOverflow),
    }
}

/// Byte stride of one encoded row with `reactions` sign slots
pub const fn row_stride(reactions: usize) -> Result<usize, LtcsError> {
    match encoded_bit_count(reactions) {
        Ok(bits) => Ok(byte_len_for(bits)),
        Err(e) => Err(e),
    }
}

/// Total bytes of a row-major encoded matrix
///
/// Conservative overflow protection mirrors the size checks applied before
/// any large buffer is reserved.
pub const fn matrix_byte_len(modes: usize, reactions: usize) -> Result<usize, LtcsError> {
    let stride = match row_stride(reactions) {
        Ok(stride) => stride,
        Err(e) => return Err(e),
    };
    match modes.checked_mul(stride) {
        Some(total) if total <= isize::MAX as usize => Ok(total),
        _ => Err(LtcsError::SizeOverflow),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_len_for() {
        assert_eq!(byte_len_for(0), 0);
        assert_eq!(byte_len_for(1), 1);
        assert_eq!(byte_len_for(8), 1);
        assert_eq!(byte_len_for(9), 2);
    }

    #[test]
    fn test_row_stride() {
        assert_eq!(row_stride(0), Ok(0));
        assert_eq!(row_stride(4), Ok(1));
        assert_eq!(row_stride(5), Ok(2));
        assert_eq!(encoded_bit_count(usize::MAX), Err(LtcsError::SizeOverflow));
    }

    #[test]
    fn test_matrix_byte_len() {
        assert_eq!(matrix_byte_len(10, 5), Ok(20));
        assert_eq!(matrix_byte_len(usize::MAX, 8), Err(LtcsError::SizeOverflow));
    }
}
