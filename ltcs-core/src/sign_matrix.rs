//! Packed sign matrix of flux modes
//!
//! Rows are flux modes, each `stride` bytes long, holding one two-bit sign
//! slot per encoded reaction (see [`crate::format`]). Rows are stored back to
//! back in one flat buffer so millions of modes cost one allocation.

use alloc::vec::Vec;

use crate::format::{Sign, NEGATIVE_BIT, POSITIVE_BIT, POSITIVE_MASK};
use crate::validation::{matrix_byte_len, row_stride};
use crate::{LtcsError, Result};

/// Row-major two-bit sign encoding of flux modes
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignMatrix {
    data: Vec<u8>,
    stride: usize,
    modes: usize,
    reactions: usize,
}

impl SignMatrix {
    /// Create a matrix with no modes and `reactions` slots per row
    pub fn new(reactions: usize) -> Result<Self> {
        Ok(Self {
            data: Vec::new(),
            stride: row_stride(reactions)?,
            modes: 0,
            reactions,
        })
    }

    /// Create an empty matrix with room for `modes` rows
    pub fn with_capacity(modes: usize, reactions: usize) -> Result<Self> {
        let mut matrix = Self::new(reactions)?;
        let bytes = matrix_byte_len(modes, reactions)?;
        matrix
            .data
            .try_reserve_exact(bytes)
            .map_err(|_| LtcsError::AllocationFailure)?;
        Ok(matrix)
    }

    /// Build a matrix from rows encoded elsewhere with the same bit layout
    ///
    /// Every slot is checked; a pair with both flags set is rejected.
    pub fn from_encoded<R: AsRef<[u8]>>(rows: &[R], reactions: usize) -> Result<Self> {
        let mut matrix = Self::with_capacity(rows.len(), reactions)?;
        for row in rows {
            matrix.push_row(row.as_ref())?;
        }
        matrix.validate()?;
        Ok(matrix)
    }

    /// Append an encoded row of exactly `stride` bytes
    pub fn push_row(&mut self, row: &[u8]) -> Result<()> {
        if row.len() != self.stride {
            return Err(LtcsError::DimensionMismatch {
                expected: self.stride,
                found: row.len(),
            });
        }
        self.data
            .try_reserve(self.stride)
            .map_err(|_| LtcsError::AllocationFailure)?;
        self.data.extend_from_slice(row);
        self.modes += 1;
        Ok(())
    }

    /// Append a row with zero flux on every reaction
    pub fn push_zero_row(&mut self) -> Result<()> {
        self.data
            .try_reserve(self.stride)
            .map_err(|_| LtcsError::AllocationFailure)?;
        self.data.resize(self.data.len() + self.stride, 0);
        self.modes += 1;
        Ok(())
    }

    /// Number of flux modes (rows)
    pub fn modes(&self) -> usize {
        self.modes
    }

    /// Number of encoded reaction slots per row
    pub fn reactions(&self) -> usize {
        self.reactions
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Encoded bytes of one mode
    pub fn row(&self, mode: usize) -> &[u8] {
        let start = mode * self.stride;
        &self.data[start..start + self.stride]
    }

    /// Whether `mode` carries positive flux on reaction slot `reaction`
    #[inline]
    pub fn is_positive(&self, mode: usize, reaction: usize) -> bool {
        self.flag(mode, 2 * reaction + POSITIVE_BIT)
    }

    /// Whether `mode` carries negative flux on reaction slot `reaction`
    #[inline]
    pub fn is_negative(&self, mode: usize, reaction: usize) -> bool {
        self.flag(mode, 2 * reaction + NEGATIVE_BIT)
    }

    /// Decoded sign of `mode` on reaction slot `reaction`
    pub fn sign(&self, mode: usize, reaction: usize) -> Result<Sign> {
        Sign::from_bits(read_slot(self.row(mode), reaction))
            .ok_or(LtcsError::InvariantViolation { mode, reaction })
    }

    /// Check the mutual-exclusion invariant for every slot of every row
    pub fn validate(&self) -> Result<()> {
        for mode in 0..self.modes {
            check_row(self.row(mode), mode)?;
        }
        Ok(())
    }

    #[inline]
    fn flag(&self, mode: usize, bit: usize) -> bool {
        debug_assert!(mode < self.modes && bit < 2 * self.reactions);
        self.data[mode * self.stride + bit / 8] & (1 << (bit % 8)) != 0
    }
}

/// Store `sign` in slot `slot` of an encoded row, replacing what was there
#[inline]
pub(crate) fn write_slot(row: &mut [u8], slot: usize, sign: Sign) {
    let bit = 2 * slot;
    let byte = &mut row[bit / 8];
    *byte &= !(0b11 << (bit % 8));
    *byte |= sign.to_bits() << (bit % 8);
}

/// Raw bit pair of slot `slot` of an encoded row
#[inline]
pub(crate) fn read_slot(row: &[u8], slot: usize) -> u8 {
    let bit = 2 * slot;
    (row[bit / 8] >> (bit % 8)) & 0b11
}

/// Reject a row holding a slot with both flags set
pub(crate) fn check_row(row: &[u8], mode: usize) -> Result<()> {
    for (index, &byte) in row.iter().enumerate() {
        let both = byte & (byte >> 1) & POSITIVE_MASK;
        if both != 0 {
            let reaction = index * 4 + both.trailing_zeros() as usize / 2;
            return Err(LtcsError::InvariantViolation { mode, reaction });
        }
    }
    Ok(())
}
