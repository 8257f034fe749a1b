//! Encoding constants and default thresholds

/// Bits used to encode the sign of one reaction in a flux mode
pub const BITS_PER_REACTION: usize = 2;

/// Offset of the positive-flux flag within a reaction's bit pair
pub const POSITIVE_BIT: usize = 0;

/// Offset of the negative-flux flag within a reaction's bit pair
pub const NEGATIVE_BIT: usize = 1;

/// Mask selecting the positive flag of every bit pair in a byte
pub const POSITIVE_MASK: u8 = 0b0101_0101;

/// Default magnitude below which a flux value counts as zero
pub const DEFAULT_FLUX_THRESHOLD: f64 = 1e-8;

/// Default magnitude below which exchange flux counts as absent
pub const DEFAULT_LOOP_THRESHOLD: f64 = 1e-8;

/// Default magnitude below which a stoichiometric coefficient counts as zero
pub const DEFAULT_ZERO_THRESHOLD: f64 = 1e-10;
