//! Per-reaction usage statistics over final mode sets
//!
//! For every reaction and every set, the share of member modes carrying flux
//! through that reaction, in percent. The value is negated when members use
//! the reaction in reverse direction.

use alloc::vec;
use alloc::vec::Vec;

use crate::{BitVector, SignMatrix};

/// Reaction-major table of signed usage percentages
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactionSummary {
    values: Vec<f64>,
    reactions: usize,
    sets: usize,
}

impl ReactionSummary {
    /// Number of reactions (rows)
    pub fn reactions(&self) -> usize {
        self.reactions
    }

    /// Number of sets (columns)
    pub fn sets(&self) -> usize {
        self.sets
    }

    /// Signed percentage for one reaction and one set
    pub fn get(&self, reaction: usize, set: usize) -> f64 {
        self.values[reaction * self.sets + set]
    }

    /// Values of one reaction across all sets
    pub fn row(&self, reaction: usize) -> &[f64] {
        let start = reaction * self.sets;
        &self.values[start..start + self.sets]
    }
}

/// Compute usage percentages of every reaction of `full` within each set
///
/// `full` must encode every reaction that should appear in the table; the
/// cleaned matrix would only report the reactions kept for partitioning.
pub fn summarize(sets: &[BitVector], full: &SignMatrix) -> ReactionSummary {
    let reactions = full.reactions();
    let mut values = vec![0.0; reactions * sets.len()];
    let mut counts = vec![0usize; reactions];
    let mut reverse = BitVector::new(reactions);

    for (column, set) in sets.iter().enumerate() {
        counts.fill(0);
        for reaction in 0..reactions {
            reverse.clear(reaction);
        }

        for mode in set.iter_ones() {
            for reaction in 0..reactions {
                if full.is_positive(mode, reaction) {
                    counts[reaction] += 1;
                } else if full.is_negative(mode, reaction) {
                    counts[reaction] += 1;
                    reverse.set(reaction);
                }
            }
        }

        let cardinality = set.count_ones();
        if cardinality == 0 {
            continue;
        }
        for reaction in 0..reactions {
            let mut value = counts[reaction] as f64 * 100.0 / cardinality as f64;
            if reverse.test(reaction) {
                value = -value;
            }
            values[reaction * sets.len() + column] = value;
        }
    }

    ReactionSummary {
        values,
        reactions,
        sets: sets.len(),
    }
}
