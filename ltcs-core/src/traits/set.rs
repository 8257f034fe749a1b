//! Read-only view of a set of flux modes
//!
//! Reporting code only needs membership and size, so it is written against
//! this trait rather than a concrete storage type.

/// A subset of the flux modes `0..universe()`
pub trait ModeSet {
    /// Whether mode `mode` belongs to the set
    fn contains(&self, mode: usize) -> bool;

    /// Number of member modes
    fn cardinality(&self) -> usize;

    /// Number of modes the set is drawn from
    fn universe(&self) -> usize;
}
