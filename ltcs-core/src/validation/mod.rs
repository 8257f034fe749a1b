//! Validation and parsing utilities for LTCS inputs
//!
//! Pure functions with no I/O dependencies: size arithmetic for packed
//! storage and token parsing for the text formats.

pub mod bounds;
pub mod parsing;

pub use bounds::{byte_len_for, encoded_bit_count, matrix_byte_len, row_stride};
pub use parsing::{
    parse_flux, parse_reversibility_flag, parse_switch, split_fields, split_names,
};
