//! Byte-packed bit vectors
//!
//! Bit `i` lives in byte `i / 8` at offset `i % 8`, least significant bit
//! first. Mode sets and sign rows share this layout, so bytes written by
//! [`BitVector::as_bytes`] can be compared bit-for-bit with other tools.

use alloc::vec::Vec;

use crate::validation::byte_len_for;
use crate::{LtcsError, Result};

/// Fixed-capacity bit array backed by a byte buffer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitVector {
    /// Packed bits, `ceil(len / 8)` bytes
    bits: Vec<u8>,
    /// Number of addressable bits
    len: usize,
}

/// How two equally sized bit vectors relate as sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Both hold exactly the same bits
    Equal,
    /// `self` holds every bit of `other` and at least one more
    Superset,
    /// `other` holds every bit of `self` and at least one more
    Subset,
    /// Each holds a bit the other lacks
    Incomparable,
}

impl BitVector {
    /// Create a zeroed vector addressing `bit_count` bits
    pub fn new(bit_count: usize) -> Self {
        Self {
            bits: alloc::vec![0; byte_len_for(bit_count)],
            len: bit_count,
        }
    }

    /// Create a zeroed vector, reporting allocation failure instead of aborting
    pub fn try_new(bit_count: usize) -> Result<Self> {
        let byte_len = byte_len_for(bit_count);
        let mut bits = Vec::new();
        bits.try_reserve_exact(byte_len)
            .map_err(|_| LtcsError::AllocationFailure)?;
        bits.resize(byte_len, 0);
        Ok(Self {
            bits,
            len: bit_count,
        })
    }

    /// Create a vector with all `bit_count` bits set
    pub fn filled(bit_count: usize) -> Self {
        let mut vector = Self {
            bits: alloc::vec![0xFF; byte_len_for(bit_count)],
            len: bit_count,
        };
        vector.mask_tail();
        vector
    }

    /// Wrap raw bytes produced elsewhere with the same layout
    ///
    /// Bits past `bit_count` in the final byte are cleared.
    pub fn from_bytes(bits: Vec<u8>, bit_count: usize) -> Result<Self> {
        let expected = byte_len_for(bit_count);
        if bits.len() != expected {
            return Err(LtcsError::DimensionMismatch {
                expected,
                found: bits.len(),
            });
        }
        let mut vector = Self {
            bits,
            len: bit_count,
        };
        vector.mask_tail();
        Ok(vector)
    }

    /// Check whether bit `index` is set
    #[inline]
    pub fn test(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "bit {index} out of range {}", self.len);
        self.bits[index / 8] & (1 << (index % 8)) != 0
    }

    /// Set bit `index`
    #[inline]
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < self.len, "bit {index} out of range {}", self.len);
        self.bits[index / 8] |= 1 << (index % 8);
    }

    /// Clear bit `index`
    #[inline]
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < self.len, "bit {index} out of range {}", self.len);
        self.bits[index / 8] &= !(1 << (index % 8));
    }

    /// Number of addressable bits
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the vector addresses no bits at all
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    /// Whether any bit is set
    pub fn any(&self) -> bool {
        self.bits.iter().any(|&byte| byte != 0)
    }

    /// Iterate over the indices of set bits in ascending order
    pub fn iter_ones(&self) -> Ones<'_> {
        Ones {
            bytes: &self.bits,
            byte_index: 0,
            current: 0,
        }
    }

    /// Packed bytes (for bit-exact export)
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    /// Relate two vectors of equal length as sets
    ///
    /// The scan stops as soon as each side is known to hold a bit the other
    /// lacks.
    pub fn compare(&self, other: &BitVector) -> Containment {
        debug_assert_eq!(self.len, other.len);
        let mut only_self = false;
        let mut only_other = false;
        for (&a, &b) in self.bits.iter().zip(other.bits.iter()) {
            only_self |= a & !b != 0;
            only_other |= b & !a != 0;
            if only_self && only_other {
                return Containment::Incomparable;
            }
        }
        match (only_self, only_other) {
            (false, false) => Containment::Equal,
            (true, false) => Containment::Superset,
            (false, true) => Containment::Subset,
            (true, true) => Containment::Incomparable,
        }
    }

    fn mask_tail(&mut self) {
        let tail = self.len % 8;
        if tail != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last &= (1u8 << tail) - 1;
            }
        }
    }
}

/// Iterator over set bit indices, skipping zero bytes
#[derive(Debug, Clone)]
pub struct Ones<'a> {
    bytes: &'a [u8],
    byte_index: usize,
    current: u8,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let offset = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some((self.byte_index - 1) * 8 + offset);
            }
            let &byte = self.bytes.get(self.byte_index)?;
            self.current = byte;
            self.byte_index += 1;
        }
    }
}

impl crate::traits::ModeSet for BitVector {
    fn contains(&self, mode: usize) -> bool {
        self.test(mode)
    }

    fn cardinality(&self) -> usize {
        self.count_ones()
    }

    fn universe(&self) -> usize {
        self.len
    }
}
