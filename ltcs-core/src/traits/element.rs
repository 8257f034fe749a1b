//! Numeric types accepted as raw flux values
//!
//! This module defines the trait that constrains what types can be
//! classified into signs when loading flux modes.

/// Trait for types that can be loaded as flux values
///
/// All flux value types must be:
/// - Copy: rows are scanned by value
/// - PartialOrd: values are compared against thresholds
pub trait FluxValue: Copy + PartialOrd {
    /// Convert to f64 for threshold comparison
    fn to_f64(self) -> f64;
}

impl FluxValue for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl FluxValue for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl FluxValue for i32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl FluxValue for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}
