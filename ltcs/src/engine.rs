//! Parallel partition refinement of flux modes
//!
//! Starting from one block holding every non-loop mode, each retained
//! reaction splits every block into the modes compatible with positive flux
//! and those compatible with negative flux. Modes without flux on the reaction
//! go to both sides. A child made only of such modes is dropped when its
//! sibling has an active member; a block with no active member at all yields
//! two identical children. After the last reaction no block uses any reaction
//! in both directions.
//!
//! Each reaction is one wave on a dedicated rayon pool. Blocks are striped
//! over the workers by `block % workers`; every worker fills its own buffer
//! and the buffers are concatenated in worker order, so the output order is
//! fixed for a given worker count.

use log::{debug, info};
use ltcs_core::{BitVector, LtcsError, SignMatrix};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{Error, Result};

/// Partition-refinement engine backed by a fixed-size worker pool
pub struct PartitionEngine {
    pool: ThreadPool,
    workers: usize,
}

impl PartitionEngine {
    /// Start a pool with exactly `workers` threads
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::Config("at least one worker is required".into()));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("ltcs-worker-{index}"))
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;
        Ok(Self { pool, workers })
    }

    /// Number of pool threads
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Split `universe` by every reaction slot of `matrix`
    ///
    /// An empty universe yields no blocks. With no reaction slots the
    /// universe itself is the only block.
    pub fn refine(&self, universe: BitVector, matrix: &SignMatrix) -> Result<Vec<BitVector>> {
        if !universe.any() {
            return Ok(Vec::new());
        }
        if universe.len() != matrix.modes() {
            return Err(LtcsError::DimensionMismatch {
                expected: matrix.modes(),
                found: universe.len(),
            }
            .into());
        }

        let reactions = matrix.reactions();
        let mut generation = vec![universe];
        for reaction in 0..reactions {
            generation = self.split(&generation, matrix, reaction)?;
            info!("iteration {}/{}: {} ltcs", reaction + 1, reactions, generation.len());
        }
        Ok(generation)
    }

    /// Run one wave over `generation` for a single reaction slot
    fn split(
        &self,
        generation: &[BitVector],
        matrix: &SignMatrix,
        reaction: usize,
    ) -> Result<Vec<BitVector>> {
        if generation.is_empty() {
            return Ok(Vec::new());
        }
        let active = self.workers.min(generation.len());
        let capacity = generation.len() * 2 / active + active;

        let stripes = self.pool.install(|| {
            (0..active)
                .into_par_iter()
                .map(|worker| split_stripe(generation, matrix, reaction, worker, active, capacity))
                .collect::<ltcs_core::Result<Vec<_>>>()
        })?;

        if log::log_enabled!(log::Level::Debug) {
            let sizes: Vec<usize> = stripes.iter().map(Vec::len).collect();
            debug!("reaction slot {reaction}: blocks per worker {sizes:?}");
        }

        let total = stripes.iter().map(Vec::len).sum();
        let mut next = Vec::new();
        next.try_reserve_exact(total)
            .map_err(|_| LtcsError::AllocationFailure)?;
        for stripe in stripes {
            next.extend(stripe);
        }
        Ok(next)
    }
}

impl std::fmt::Debug for PartitionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionEngine")
            .field("workers", &self.workers)
            .finish()
    }
}

/// Split the blocks `worker, worker + workers, ...` of `generation`
fn split_stripe(
    generation: &[BitVector],
    matrix: &SignMatrix,
    reaction: usize,
    worker: usize,
    workers: usize,
    capacity: usize,
) -> ltcs_core::Result<Vec<BitVector>> {
    let mut out = Vec::new();
    out.try_reserve(capacity)
        .map_err(|_| LtcsError::AllocationFailure)?;

    for block in generation.iter().skip(worker).step_by(workers) {
        let has_positive = block.iter_ones().any(|m| matrix.is_positive(m, reaction));
        let has_negative = block.iter_ones().any(|m| matrix.is_negative(m, reaction));
        if !has_positive && !has_negative {
            // every member is zero here, so both children equal the block
            out.try_reserve(2)
                .map_err(|_| LtcsError::AllocationFailure)?;
            out.push(block.clone());
            out.push(block.clone());
            continue;
        }

        let mut positive = BitVector::try_new(block.len())?;
        let mut negative = BitVector::try_new(block.len())?;
        for mode in block.iter_ones() {
            if matrix.is_positive(mode, reaction) {
                positive.set(mode);
            } else if matrix.is_negative(mode, reaction) {
                negative.set(mode);
            } else {
                positive.set(mode);
                negative.set(mode);
            }
        }

        out.try_reserve(2)
            .map_err(|_| LtcsError::AllocationFailure)?;
        if has_positive {
            out.push(positive);
        }
        if has_negative {
            out.push(negative);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltcs_core::{LoadOptions, ReactionMasks};

    fn members(set: &BitVector) -> Vec<usize> {
        set.iter_ones().collect()
    }

    fn load(rows: &[Vec<f64>]) -> ltcs_core::LoadedMatrix {
        let reactions = rows.first().map_or(0, Vec::len);
        SignMatrix::load(rows, ReactionMasks::all_reversible(reactions), LoadOptions::default())
            .unwrap()
    }

    #[test]
    fn test_four_sign_patterns_give_singletons() {
        let loaded = load(&[
            vec![1.0, 1.0],
            vec![1.0, -1.0],
            vec![-1.0, 1.0],
            vec![-1.0, -1.0],
        ]);
        let engine = PartitionEngine::new(1).unwrap();
        let blocks = engine.refine(loaded.universe(), loaded.cleaned()).unwrap();
        let blocks: Vec<Vec<usize>> = blocks.iter().map(members).collect();
        assert_eq!(blocks, vec![vec![0], vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_zero_flux_mode_joins_both_children() {
        let loaded = load(&[vec![1.0], vec![-1.0], vec![0.0]]);
        let engine = PartitionEngine::new(2).unwrap();
        let blocks = engine.refine(loaded.universe(), loaded.cleaned()).unwrap();
        let blocks: Vec<Vec<usize>> = blocks.iter().map(members).collect();
        assert_eq!(blocks, vec![vec![0, 2], vec![1, 2]]);
    }

    #[test]
    fn test_block_without_active_member_is_duplicated() {
        // after r0 the block {1, 2} has no flux on r1
        let loaded = load(&[
            vec![1.0, 1.0],
            vec![-1.0, 0.0],
            vec![-1.0, 0.0],
            vec![1.0, -1.0],
        ]);
        let engine = PartitionEngine::new(1).unwrap();
        let blocks = engine.refine(loaded.universe(), loaded.cleaned()).unwrap();
        let listed: Vec<Vec<usize>> = blocks.iter().map(members).collect();
        assert_eq!(listed, vec![vec![0], vec![3], vec![1, 2], vec![1, 2]]);

        let kept = ltcs_core::filter_maximal(blocks);
        let kept: Vec<Vec<usize>> = kept.iter().map(members).collect();
        assert_eq!(kept, vec![vec![0], vec![3], vec![1, 2], vec![1, 2]]);
    }

    #[test]
    fn test_zero_only_child_is_dropped() {
        // on r1 mode 0 is positive and mode 1 has no flux
        let loaded = load(&[vec![1.0, 1.0], vec![1.0, 0.0], vec![-1.0, -1.0]]);
        let engine = PartitionEngine::new(1).unwrap();
        let blocks = engine.refine(loaded.universe(), loaded.cleaned()).unwrap();
        let blocks: Vec<Vec<usize>> = blocks.iter().map(members).collect();
        assert_eq!(blocks, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_empty_generation_splits_to_nothing() {
        let loaded = load(&[vec![1.0], vec![-1.0]]);
        let engine = PartitionEngine::new(4).unwrap();
        let next = engine.split(&[], loaded.cleaned(), 0).unwrap();
        assert!(next.is_empty());
    }

    #[test]
    fn test_empty_universe_yields_nothing() {
        let engine = PartitionEngine::new(4).unwrap();
        let matrix = SignMatrix::new(3).unwrap();
        assert!(engine.refine(BitVector::new(0), &matrix).unwrap().is_empty());
    }

    #[test]
    fn test_no_reactions_returns_universe() {
        let loaded = load(&[vec![0.0, 2.0]]);
        assert_eq!(loaded.cleaned().reactions(), 0);
        let engine = PartitionEngine::new(3).unwrap();
        let blocks = engine.refine(loaded.universe(), loaded.cleaned()).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(members(&blocks[0]), vec![0]);
    }

    #[test]
    fn test_worker_order_is_deterministic() {
        let rows: Vec<Vec<f64>> = (0..16)
            .map(|m| (0..4).map(|r| if (m >> r) & 1 == 1 { 1.0 } else { -1.0 }).collect())
            .collect();
        let loaded = load(&rows);
        let engine = PartitionEngine::new(3).unwrap();
        let first = engine.refine(loaded.universe(), loaded.cleaned()).unwrap();
        let second = engine.refine(loaded.universe(), loaded.cleaned()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 16);
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(PartitionEngine::new(0), Err(Error::Config(_))));
    }

    #[test]
    fn test_universe_length_mismatch() {
        let loaded = load(&[vec![1.0], vec![-1.0]]);
        let engine = PartitionEngine::new(1).unwrap();
        let result = engine.refine(BitVector::filled(5), loaded.cleaned());
        assert!(matches!(
            result,
            Err(Error::Core(LtcsError::DimensionMismatch { expected: 2, found: 5 }))
        ));
    }
}
