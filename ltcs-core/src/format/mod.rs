//! Bit-level encoding of flux-mode sign patterns
//!
//! Every encoded reaction occupies two adjacent bits of a mode's row:
//! bit `2j` flags positive flux and bit `2j + 1` flags negative flux on
//! reaction slot `j`. Neither flag means zero flux.

pub mod constants;
pub mod sign;

pub use constants::*;
pub use sign::Sign;
