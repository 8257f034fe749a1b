//! LTCS - largest thermodynamically consistent sets of elementary flux modes
//!
//! This library groups elementary flux modes (EFMs) into maximal sets whose
//! members never use a reaction in opposite directions.
//!
//! ## Architecture
//!
//! LTCS follows the same core/implementation split as its file formats:
//!
//! - **ltcs-core**: sign encoding, set algebra and token parsing (`no_std`, no I/O)
//! - **ltcs**: parallel partitioning, file readers, reports and the `calc-ltcs` binary
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ltcs::{run, LtcsConfig, RunFiles};
//!
//! fn example() -> ltcs::Result<()> {
//!     let files = RunFiles::new("efms.txt")
//!         .with_stoichiometry("stoich.txt")
//!         .with_ltcs_out("ltcs.out");
//!     let config = LtcsConfig::with_threads(4).with_csv(false);
//!
//!     let result = run(&files, &config)?;
//!     println!("{} LTCS from {} EFMs", result.sets().len(), result.mode_count());
//!     Ok(())
//! }
//! ```
//!
//! In-memory flux rows go through [`SignMatrix::load`] and [`compute`]:
//!
//! ```rust
//! use ltcs::{compute, LoadOptions, LtcsConfig, ReactionMasks, SignMatrix};
//!
//! let rows = vec![vec![1.0, 1.0], vec![1.0, -1.0], vec![-1.0, 1.0], vec![-1.0, -1.0]];
//! let loaded = SignMatrix::load(&rows, ReactionMasks::all_reversible(2), LoadOptions::default())?;
//! let result = compute(&loaded, &LtcsConfig::default())?;
//! assert_eq!(result.sets().len(), 4);
//! # Ok::<(), ltcs::Error>(())
//! ```
//!
//! ## Features
//!
//! - **mmap** (default): memory-mapped input files
//! - **serde** (default): `Serialize`/`Deserialize` on config and summaries, JSON summary output

// Re-export core abstractions
pub use ltcs_core::{
    // Encoded data
    BitVector, Containment, Sign, SignMatrix,
    // Loading
    LoadOptions, LoadedMatrix, ReactionMasks, SignMatrixBuilder,
    // Set algebra
    excluded_mask, filter_maximal, summarize, ReactionSummary,
    // Traits
    FluxValue, ModeSet,
    // Core errors
    LtcsError,
};

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod report;

pub use config::LtcsConfig;
pub use engine::PartitionEngine;
pub use error::{Error, Result};
pub use pipeline::{compute, run, LtcsResult, RunFiles};
pub use report::RunSummary;
