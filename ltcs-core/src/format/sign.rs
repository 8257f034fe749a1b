//! Two-bit sign encoding of a reaction within a flux mode

use super::constants::{NEGATIVE_BIT, POSITIVE_BIT};

/// Direction a flux mode uses a reaction in
///
/// The discriminant is the bit pair as stored: bit 0 flags positive flux,
/// bit 1 flags negative flux. Both bits set is never a valid sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Sign {
    /// No flux through the reaction
    Zero = 0,
    /// Flux in forward direction
    Positive = 1 << POSITIVE_BIT,
    /// Flux in reverse direction
    Negative = 1 << NEGATIVE_BIT,
}

impl Sign {
    /// Classify a flux value against a symmetric zero threshold
    ///
    /// Values at exactly `threshold` (or `-threshold`) count as nonzero.
    pub fn classify(value: f64, threshold: f64) -> Self {
        if value >= threshold {
            Sign::Positive
        } else if value <= -threshold {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    /// Convert from the stored bit pair; `None` for the invalid `11` pair
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Sign::Zero),
            1 => Some(Sign::Positive),
            2 => Some(Sign::Negative),
            _ => None,
        }
    }

    /// Convert to the stored bit pair
    pub const fn to_bits(self) -> u8 {
        self as u8
    }

    /// Whether the mode carries flux through the reaction
    pub const fn is_active(self) -> bool {
        !matches!(self, Sign::Zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Sign::classify(0.5, 1e-8), Sign::Positive);
        assert_eq!(Sign::classify(-0.5, 1e-8), Sign::Negative);
        assert_eq!(Sign::classify(1e-9, 1e-8), Sign::Zero);
        assert_eq!(Sign::classify(-1e-9, 1e-8), Sign::Zero);
        assert_eq!(Sign::classify(1e-8, 1e-8), Sign::Positive);
        assert_eq!(Sign::classify(-1e-8, 1e-8), Sign::Negative);
    }

    #[test]
    fn test_bits_roundtrip_and_invalid_pair() {
        for sign in [Sign::Zero, Sign::Positive, Sign::Negative] {
            assert_eq!(Sign::from_bits(sign.to_bits()), Some(sign));
        }
        assert_eq!(Sign::from_bits(0b11), None);
    }

    #[test]
    fn test_is_active() {
        assert!(!Sign::Zero.is_active());
        assert!(Sign::Positive.is_active());
        assert!(Sign::Negative.is_active());
    }
}
