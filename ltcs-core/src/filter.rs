//! Removal of candidate sets contained in another candidate
//!
//! Every pair of still-surviving sets is compared once. Identical sets do not
//! dominate each other, so duplicates survive together.

use alloc::vec::Vec;

use crate::bit_vector::{BitVector, Containment};

/// Mark every set that is a strict subset of another set
///
/// Bit `i` of the returned mask is set when `sets[i]` is excluded.
pub fn excluded_mask(sets: &[BitVector]) -> BitVector {
    let mut excluded = BitVector::new(sets.len());
    for i in 0..sets.len() {
        if excluded.test(i) {
            continue;
        }
        for j in (i + 1)..sets.len() {
            if excluded.test(j) {
                continue;
            }
            match sets[i].compare(&sets[j]) {
                Containment::Superset => excluded.set(j),
                Containment::Subset => {
                    excluded.set(i);
                    break;
                }
                Containment::Equal | Containment::Incomparable => {}
            }
        }
    }
    excluded
}

/// Keep only the sets not contained in another set, in original order
pub fn filter_maximal(sets: Vec<BitVector>) -> Vec<BitVector> {
    let excluded = excluded_mask(&sets);
    sets.into_iter()
        .enumerate()
        .filter_map(|(i, set)| (!excluded.test(i)).then_some(set))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn set(universe: usize, members: &[usize]) -> BitVector {
        let mut set = BitVector::new(universe);
        for &m in members {
            set.set(m);
        }
        set
    }

    fn members(set: &BitVector) -> Vec<usize> {
        set.iter_ones().collect()
    }

    #[test]
    fn test_drops_strict_subset() {
        let sets = vec![set(6, &[1, 2, 3]), set(6, &[1, 2]), set(6, &[4, 5])];
        let kept = filter_maximal(sets);
        assert_eq!(kept.len(), 2);
        assert_eq!(members(&kept[0]), vec![1, 2, 3]);
        assert_eq!(members(&kept[1]), vec![4, 5]);
    }

    #[test]
    fn test_later_superset_excludes_earlier() {
        let sets = vec![set(5, &[0]), set(5, &[3]), set(5, &[0, 1])];
        let excluded = excluded_mask(&sets);
        assert_eq!(excluded.iter_ones().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_identical_sets_are_both_kept() {
        let sets = vec![set(4, &[0, 2]), set(4, &[0, 2]), set(4, &[0])];
        let kept = filter_maximal(sets);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0], kept[1]);
    }

    #[test]
    fn test_chain_of_subsets() {
        let sets = vec![set(4, &[0]), set(4, &[0, 1]), set(4, &[0, 1, 2]), set(4, &[3])];
        let kept = filter_maximal(sets);
        assert_eq!(kept.iter().map(members).collect::<Vec<_>>(), vec![vec![0, 1, 2], vec![3]]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(filter_maximal(Vec::new()).is_empty());
        assert_eq!(filter_maximal(vec![set(3, &[1])]).len(), 1);
    }

    #[test]
    fn test_no_survivor_is_strict_subset_of_another() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let sets: Vec<BitVector> = (0..60)
            .map(|_| {
                let mut s = BitVector::new(12);
                for m in 0..12 {
                    if rng.gen_bool(0.4) {
                        s.set(m);
                    }
                }
                s
            })
            .collect();
        let kept = filter_maximal(sets.clone());
        for a in &kept {
            for b in &kept {
                assert_ne!(a.compare(b), Containment::Subset);
            }
        }
        // every input set is covered by some survivor
        for s in &sets {
            assert!(kept
                .iter()
                .any(|k| matches!(k.compare(s), Containment::Superset | Containment::Equal)));
        }
    }
}
