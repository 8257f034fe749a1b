//! Loading raw flux modes into sign matrices
//!
//! Rows are classified one at a time by [`SignMatrixBuilder`], which keeps a
//! staging encoding over all reversible reactions and remembers which
//! reactions have been seen in each direction. [`SignMatrixBuilder::finish`]
//! then drops every reaction that never changes sign across the non-loop
//! modes, since such a reaction cannot separate any two modes.

use alloc::vec::Vec;

use crate::format::{Sign, DEFAULT_FLUX_THRESHOLD, DEFAULT_LOOP_THRESHOLD};
use crate::sign_matrix::{check_row, read_slot, write_slot};
use crate::traits::FluxValue;
use crate::validation::row_stride;
use crate::{BitVector, LtcsError, Result, SignMatrix};

/// Thresholds and ownership options for loading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadOptions {
    /// Magnitude at or above which a flux value has a sign
    pub flux_threshold: f64,
    /// Magnitude at or above which an exchange flux disqualifies a loop
    pub loop_threshold: f64,
    /// Also keep an encoding of every original reaction
    pub keep_full: bool,
}

impl LoadOptions {
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

    /// Keep the full, unreduced encoding next to the cleaned one
    pub fn with_full_matrix(mut self, keep_full: bool) -> Self {
        self.keep_full = keep_full;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            flux_threshold: DEFAULT_FLUX_THRESHOLD,
            loop_threshold: DEFAULT_LOOP_THRESHOLD,
            keep_full: false,
        }
    }
}

/// Per-reaction properties of the network, indexed by original reaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionMasks {
    reversible: BitVector,
    exchange: Option<BitVector>,
}

impl ReactionMasks {
    /// Treat all `reactions` as reversible, with loop detection disabled
    pub fn all_reversible(reactions: usize) -> Self {
        Self {
            reversible: BitVector::filled(reactions),
            exchange: None,
        }
    }

    /// Replace the reversibility mask
    pub fn with_reversible(mut self, reversible: BitVector) -> Result<Self> {
        if reversible.len() != self.reversible.len() {
            return Err(LtcsError::DimensionMismatch {
                expected: self.reversible.len(),
                found: reversible.len(),
            });
        }
        self.reversible = reversible;
        Ok(self)
    }

    /// Enable loop detection with the given exchange reactions
    pub fn with_exchange(mut self, exchange: BitVector) -> Result<Self> {
        if exchange.len() != self.reversible.len() {
            return Err(LtcsError::DimensionMismatch {
                expected: self.reversible.len(),
                found: exchange.len(),
            });
        }
        self.exchange = Some(exchange);
        Ok(self)
    }

    /// Number of original reactions
    pub fn reaction_count(&self) -> usize {
        self.reversible.len()
    }

    /// Number of reversible reactions
    pub fn reversible_count(&self) -> usize {
        self.reversible.count_ones()
    }

    /// Reversibility mask
    pub fn reversible(&self) -> &BitVector {
        &self.reversible
    }

    /// Exchange mask, if loop detection is enabled
    pub fn exchange(&self) -> Option<&BitVector> {
        self.exchange.as_ref()
    }

    /// Whether internal loops are detected
    pub fn checks_loops(&self) -> bool {
        self.exchange.is_some()
    }
}

/// Streaming loader producing a [`LoadedMatrix`]
#[derive(Debug)]
pub struct SignMatrixBuilder {
    masks: ReactionMasks,
    options: LoadOptions,
    /// Encoding over reversible reactions, loop rows zeroed
    staging: SignMatrix,
    /// Encoding over all reactions when `keep_full` is set
    full: Option<SignMatrix>,
    loop_modes: Vec<usize>,
    positive_seen: BitVector,
    negative_seen: BitVector,
    scratch: Vec<u8>,
    full_scratch: Vec<u8>,
}

impl SignMatrixBuilder {
    /// Create a loader for the given network
    pub fn new(masks: ReactionMasks, options: LoadOptions) -> Result<Self> {
        let reversible = masks.reversible_count();
        let reactions = masks.reaction_count();
        let full = if options.keep_full {
            Some(SignMatrix::new(reactions)?)
        } else {
            None
        };
        Ok(Self {
            staging: SignMatrix::new(reversible)?,
            full,
            loop_modes: Vec::new(),
            positive_seen: BitVector::new(reversible),
            negative_seen: BitVector::new(reversible),
            scratch: alloc::vec![0; row_stride(reversible)?],
            full_scratch: alloc::vec![0; if options.keep_full { row_stride(reactions)? } else { 0 }],
            masks,
            options,
        })
    }

    /// Number of rows pushed so far
    pub fn mode_count(&self) -> usize {
        self.staging.modes()
    }

    /// Classify and store one flux mode
    ///
    /// Returns whether the mode was flagged as an internal loop.
    pub fn push_row<T: FluxValue>(&mut self, row: &[T]) -> Result<bool> {
        let reactions = self.masks.reaction_count();
        if row.len() != reactions {
            return Err(LtcsError::DimensionMismatch {
                expected: reactions,
                found: row.len(),
            });
        }

        let mode = self.staging.modes();
        let keep_full = self.full.is_some();
        self.scratch.fill(0);
        self.full_scratch.fill(0);

        // A loop candidate stays one until some exchange reaction carries flux
        let mut is_loop = self.masks.exchange.is_some();
        let mut slot = 0;
        for (reaction, &value) in row.iter().enumerate() {
            let value = value.to_f64();
            if is_loop {
                if let Some(exchange) = &self.masks.exchange {
                    if exchange.test(reaction)
                        && Sign::classify(value, self.options.loop_threshold).is_active()
                    {
                        is_loop = false;
                    }
                }
            }

            let sign = Sign::classify(value, self.options.flux_threshold);
            if keep_full {
                write_slot(&mut self.full_scratch, reaction, sign);
            }
            if self.masks.reversible.test(reaction) {
                write_slot(&mut self.scratch, slot, sign);
                slot += 1;
            }
        }
        check_row(&self.scratch, mode)?;

        if is_loop {
            self.loop_modes.push(mode);
            self.staging.push_zero_row()?;
            if let Some(full) = &mut self.full {
                full.push_zero_row()?;
            }
            return Ok(true);
        }

        for slot in 0..self.staging.reactions() {
            match Sign::from_bits(read_slot(&self.scratch, slot)) {
                Some(Sign::Positive) => self.positive_seen.set(slot),
                Some(Sign::Negative) => self.negative_seen.set(slot),
                Some(Sign::Zero) => {}
                None => return Err(LtcsError::InvariantViolation { mode, reaction: slot }),
            }
        }
        self.staging.push_row(&self.scratch)?;
        if let Some(full) = &mut self.full {
            full.push_row(&self.full_scratch)?;
        }
        Ok(false)
    }

    /// Reduce the reaction dimension and return the loaded matrices
    pub fn finish(self) -> Result<LoadedMatrix> {
        let modes = self.staging.modes();
        let reversible_count = self.staging.reactions();

        let mut retained = BitVector::new(reversible_count);
        let mut retained_slots = Vec::new();
        for slot in 0..reversible_count {
            if self.positive_seen.test(slot) && self.negative_seen.test(slot) {
                retained.set(slot);
                retained_slots.push(slot);
            }
        }

        let mut cleaned = SignMatrix::with_capacity(modes, retained_slots.len())?;
        let mut row = alloc::vec![0u8; cleaned.stride()];
        for mode in 0..modes {
            row.fill(0);
            let staged = self.staging.row(mode);
            for (target, &source) in retained_slots.iter().enumerate() {
                let bits = read_slot(staged, source);
                let sign = Sign::from_bits(bits).ok_or(LtcsError::InvariantViolation {
                    mode,
                    reaction: source,
                })?;
                write_slot(&mut row, target, sign);
            }
            cleaned.push_row(&row)?;
        }

        let mut loops = BitVector::new(modes);
        for &mode in &self.loop_modes {
            loops.set(mode);
        }

        // Map retained slots back to original reaction indices
        let reversible_reactions: Vec<usize> = self.masks.reversible.iter_ones().collect();
        let retained_reactions = retained_slots
            .iter()
            .map(|&slot| reversible_reactions[slot])
            .collect();

        Ok(LoadedMatrix {
            cleaned,
            full: self.full,
            loops,
            retained,
            retained_reactions,
            reaction_count: self.masks.reaction_count(),
            checks_loops: self.masks.checks_loops(),
        })
    }
}

/// Result of loading flux modes
#[derive(Debug, Clone)]
pub struct LoadedMatrix {
    cleaned: SignMatrix,
    full: Option<SignMatrix>,
    loops: BitVector,
    retained: BitVector,
    retained_reactions: Vec<usize>,
    reaction_count: usize,
    checks_loops: bool,
}

impl LoadedMatrix {
    /// Encoding restricted to reactions seen with both signs
    pub fn cleaned(&self) -> &SignMatrix {
        &self.cleaned
    }

    /// Encoding of every original reaction, if it was kept
    pub fn full(&self) -> Option<&SignMatrix> {
        self.full.as_ref()
    }

    /// Internal-loop flag per mode
    pub fn loops(&self) -> &BitVector {
        &self.loops
    }

    /// Retention flag per reversible reaction, in reversible order
    pub fn retained(&self) -> &BitVector {
        &self.retained
    }

    /// Original indices of the retained reactions, in slot order
    pub fn retained_reactions(&self) -> &[usize] {
        &self.retained_reactions
    }

    /// Total number of loaded modes, loops included
    pub fn mode_count(&self) -> usize {
        self.loops.len()
    }

    /// Number of modes flagged as internal loops
    pub fn loop_count(&self) -> usize {
        self.loops.count_ones()
    }

    /// Number of original reactions
    pub fn reaction_count(&self) -> usize {
        self.reaction_count
    }

    /// Whether loop detection ran
    pub fn checks_loops(&self) -> bool {
        self.checks_loops
    }

    /// All modes that take part in partitioning
    pub fn universe(&self) -> BitVector {
        let mut universe = BitVector::filled(self.mode_count());
        for mode in self.loops.iter_ones() {
            universe.clear(mode);
        }
        universe
    }

    /// Whether there is nothing to partition
    pub fn is_empty(&self) -> bool {
        self.mode_count() == self.loop_count() || self.reaction_count == 0
    }
}

impl SignMatrix {
    /// Load raw flux rows in one call
    ///
    /// Convenience wrapper around [`SignMatrixBuilder`] for rows already in
    /// memory.
    pub fn load<I, R, T>(rows: I, masks: ReactionMasks, options: LoadOptions) -> Result<LoadedMatrix>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[T]>,
        T: FluxValue,
    {
        let mut builder = SignMatrixBuilder::new(masks, options)?;
        for row in rows {
            builder.push_row(row.as_ref())?;
        }
        builder.finish()
    }
}
