#![no_std]

//! LTCS Core - sign-pattern encoding and set algebra for flux modes
//!
//! This crate provides the data structures behind the computation of largest
//! thermodynamically consistent sets (LTCS) of elementary flux modes:
//!
//! - [`BitVector`]: byte-packed bit arrays used for mode sets and masks
//! - [`SignMatrix`]: two bits per reaction and mode, loaded and reduced by
//!   [`SignMatrixBuilder`]
//! - [`filter_maximal`]: drops candidate sets contained in another set
//! - [`summarize`]: per-reaction usage percentages within final sets
//!
//! Everything here is pure computation over in-memory buffers. File parsing,
//! threading and reporting live in the `ltcs` crate.

extern crate alloc;

pub mod bit_vector;
pub mod error;
pub mod filter;
pub mod format;
pub mod loader;
pub mod projection;
pub mod sign_matrix;
pub mod traits;
pub mod validation;

pub use bit_vector::{BitVector, Containment, Ones};
pub use error::*;
pub use filter::{excluded_mask, filter_maximal};
pub use format::Sign;
pub use loader::{LoadOptions, LoadedMatrix, ReactionMasks, SignMatrixBuilder};
pub use projection::{summarize, ReactionSummary};
pub use sign_matrix::SignMatrix;
pub use traits::{FluxValue, ModeSet};
