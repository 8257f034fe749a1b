//! Run configuration for LTCS computation and reporting

use ltcs_core::format::{DEFAULT_FLUX_THRESHOLD, DEFAULT_LOOP_THRESHOLD, DEFAULT_ZERO_THRESHOLD};
use ltcs_core::LoadOptions;

use crate::{Error, Result};

/// Settings shared by loading, partitioning and report writing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LtcsConfig {
    /// Worker threads used per partition wave
    pub threads: usize,
    /// Magnitude at or above which a flux value has a sign
    pub flux_threshold: f64,
    /// Magnitude at or above which an exchange flux rules out an internal loop
    pub loop_threshold: f64,
    /// Stoichiometric coefficients within this magnitude count as zero
    pub zero_threshold: f64,
    /// Write membership digits comma separated instead of packed
    pub csv: bool,
    /// Write the LTCS and loops files
    pub full_output: bool,
    /// Compute per-reaction usage within each LTCS
    pub analysis: bool,
}

impl LtcsConfig {
    /// Create config with the given worker count
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads,
            ..Self::default()
        }
    }

    /// Set the flux threshold
    pub fn with_flux_threshold(mut self, threshold: f64) -> Self {
        self.flux_threshold = threshold;
        self
    }

    /// Set the loop detection threshold
    pub fn with_loop_threshold(mut self, threshold: f64) -> Self {
        self.loop_threshold = threshold;
        self
    }

    /// Set the stoichiometric zero threshold
    pub fn with_zero_threshold(mut self, threshold: f64) -> Self {
        self.zero_threshold = threshold;
        self
    }

    /// Choose CSV or packed membership output
    pub fn with_csv(mut self, csv: bool) -> Self {
        self.csv = csv;
        self
    }

    /// Enable or suppress the LTCS and loops files
    pub fn with_full_output(mut self, full_output: bool) -> Self {
        self.full_output = full_output;
        self
    }

    /// Enable the per-reaction analysis
    pub fn with_analysis(mut self, analysis: bool) -> Self {
        self.analysis = analysis;
        self
    }

    /// Loader options derived from this config
    ///
    /// The full encoding is only kept when the analysis needs it.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::default()
            .with_flux_threshold(self.flux_threshold)
            .with_loop_threshold(self.loop_threshold)
            .with_full_matrix(self.analysis)
    }

    /// Reject settings no run can use
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(Error::Config("at least one thread is required".into()));
        }
        for (name, value) in [
            ("flux threshold", self.flux_threshold),
            ("loop threshold", self.loop_threshold),
            ("zero threshold", self.zero_threshold),
        ] {
            // a zero threshold would classify 0.0 as positive flux
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for LtcsConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            flux_threshold: DEFAULT_FLUX_THRESHOLD,
            loop_threshold: DEFAULT_LOOP_THRESHOLD,
            zero_threshold: DEFAULT_ZERO_THRESHOLD,
            csv: true,
            full_output: true,
            analysis: false,
        }
    }
}
