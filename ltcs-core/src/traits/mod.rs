//! Abstract interfaces shared by the LTCS crates

pub mod element;
pub mod set;

pub use element::FluxValue;
pub use set::ModeSet;
