//! Error types for LTCS core operations

/// Errors that can occur while encoding flux modes or combining mode sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LtcsError {
    /// A mode encodes positive and negative flux for the same reaction slot
    InvariantViolation {
        /// Index of the offending flux mode
        mode: usize,
        /// Encoded reaction slot within the row
        reaction: usize,
    },
    /// A row or mask does not match the configured reaction count
    DimensionMismatch {
        /// Number of fields required
        expected: usize,
        /// Number of fields supplied
        found: usize,
    },
    /// Storage for the encoding could not be reserved
    AllocationFailure,
    /// A bit or byte size computation overflowed
    SizeOverflow,
    /// A token is not a valid flux value or reversibility flag
    InvalidToken,
    /// A switch value is neither "yes" nor "no"
    InvalidSwitch,
}

impl LtcsError {
    /// Whether the error signals a defect that no caller can recover from
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LtcsError::InvariantViolation { .. } | LtcsError::AllocationFailure
        )
    }
}

impl core::fmt::Display for LtcsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LtcsError::InvariantViolation { mode, reaction } => write!(
                f,
                "EFM {mode} has positive and negative flux for reaction slot {reaction}"
            ),
            LtcsError::DimensionMismatch { expected, found } => {
                write!(f, "Expected {expected} reactions, found {found}")
            }
            LtcsError::AllocationFailure => write!(f, "Not enough free memory"),
            LtcsError::SizeOverflow => write!(f, "Size calculation overflowed"),
            LtcsError::InvalidToken => write!(f, "Invalid token"),
            LtcsError::InvalidSwitch => write!(f, "Expected \"yes\" or \"no\""),
        }
    }
}

/// Result type for LTCS core operations
pub type Result<T> = core::result::Result<T, LtcsError>;
