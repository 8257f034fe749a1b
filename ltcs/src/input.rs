//! Input files
//!
//! All inputs are whitespace separated text. Files are memory mapped with the
//! default `mmap` feature and read into memory otherwise; parsing itself is
//! done by the pure helpers in [`ltcs_core::validation`].

mod readers;
mod source;

pub use readers::{
    efm_reaction_count, load_efms, read_exchange_mask, read_reaction_names, read_reversibility,
};
pub use source::TextFile;
