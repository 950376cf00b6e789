//! Genetic operators over fixed-length action sequences.
//!
//! Both operators preserve solution length. They are shared by every
//! strategy: local search and simulated annealing only mutate, the GA
//! crosses elites and then mutates the children.
//!
//! # Mutation
//!
//! - [`mutate`]: copy, then replace one uniformly chosen gene
//! - [`mutate_in_place`]: the same replacement applied to an owned solution
//!
//! # Crossover
//!
//! - [`crossover`]: alternating, duplicate-avoiding crossover with a shared
//!   parent cursor

use crate::error::{Result, SearchError};
use crate::model::{Action, ActionSpace, Solution};
use rand::Rng;
use std::collections::HashSet;
use tracing::trace;

// ============================================================================
// Mutation
// ============================================================================

/// Returns a copy of `solution` with one gene redrawn from `space`.
///
/// The index is uniform over `0..len` and the new action is an independent
/// uniform draw, so the copy may coincide with the input when the draw
/// repeats the old gene. The input is never modified.
///
/// # Panics
/// Panics if `solution` is empty.
pub fn mutate<R: Rng>(solution: &Solution, space: &ActionSpace, rng: &mut R) -> Solution {
    let mut child = solution.clone();
    mutate_in_place(&mut child, space, rng);
    child
}

/// Replaces one uniformly chosen gene of `solution` with a fresh draw.
///
/// # Panics
/// Panics if `solution` is empty.
pub fn mutate_in_place<R: Rng>(solution: &mut Solution, space: &ActionSpace, rng: &mut R) {
    assert!(!solution.is_empty(), "cannot mutate an empty solution");
    let index = rng.random_range(0..solution.len());
    solution.set(index, space.sample(rng));
}

// ============================================================================
// Crossover
// ============================================================================

/// Alternating duplicate-avoiding crossover.
///
/// # Algorithm
///
/// A single read cursor `k` walks both parents in lockstep, wrapping at the
/// end. For each child slot:
///
/// 1. Take the gene at `k` from the preferred parent if the child does not
///    hold that value yet, then switch preference to the other parent.
/// 2. Otherwise take the other parent's gene at `k` if unused, keeping the
///    current preference.
/// 3. Otherwise leave the slot empty and retry it at `k + 1`.
///
/// A slot is retried for at most one full cursor cycle. After `n`
/// consecutive misses every gene of both parents is already in the child,
/// and since the used set only grows, no later slot can find a fresh value
/// either. From then on the remaining slots take the preferred parent's gene
/// at the cursor, duplicates included.
///
/// The child therefore has no duplicate actions whenever the parents jointly
/// contain at least `n` distinct actions.
///
/// # Complexity
/// O(n²) cursor steps worst case, O(n) space
///
/// # Errors
/// [`SearchError::LengthMismatch`] if the parents differ in length.
pub fn crossover(parent1: &Solution, parent2: &Solution) -> Result<Solution> {
    let n = parent1.len();
    if parent2.len() != n {
        return Err(SearchError::LengthMismatch {
            expected: n,
            actual: parent2.len(),
        });
    }

    let p1 = parent1.actions();
    let p2 = parent2.actions();

    let mut child: Vec<Action> = Vec::with_capacity(n);
    let mut used: HashSet<Action> = HashSet::with_capacity(n);
    let mut cursor = 0usize;
    let mut prefer_first = true;
    let mut misses = 0usize;
    let mut exhausted = false;

    while child.len() < n {
        let (preferred, other) = if prefer_first { (p1, p2) } else { (p2, p1) };

        if exhausted {
            child.push(preferred[cursor]);
        } else if used.insert(preferred[cursor]) {
            child.push(preferred[cursor]);
            prefer_first = !prefer_first;
            misses = 0;
        } else if used.insert(other[cursor]) {
            child.push(other[cursor]);
            misses = 0;
        } else {
            misses += 1;
            if misses >= n {
                trace!(
                    slot = child.len(),
                    "parents exhausted distinct genes; filling with duplicates"
                );
                exhausted = true;
                child.push(preferred[cursor]);
            }
        }

        cursor = (cursor + 1) % n;
    }

    Ok(Solution::new(child))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn has_duplicates(sol: &Solution) -> bool {
        let set: HashSet<Action> = sol.iter().copied().collect();
        set.len() != sol.len()
    }

    fn distinct_line(n: i32) -> Vec<Action> {
        (0..n).map(|i| Action::new(i, 0)).collect()
    }

    // ---- Mutation ----

    #[test]
    fn test_mutate_leaves_input_untouched() {
        let mut rng = StdRng::seed_from_u64(42);
        let space = ActionSpace::cardinal();
        let original = Solution::new(vec![Action::UP; 6]);
        let snapshot = original.clone();

        for _ in 0..50 {
            let _ = mutate(&original, &space, &mut rng);
        }
        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_mutate_changes_at_most_one_gene() {
        let mut rng = StdRng::seed_from_u64(7);
        let space = ActionSpace::octile();
        let original = Solution::random(12, &space, &mut rng);

        for _ in 0..200 {
            let child = mutate(&original, &space, &mut rng);
            assert_eq!(child.len(), original.len());
            assert!(child.hamming_distance(&original).unwrap() <= 1);
        }
    }

    #[test]
    fn test_mutate_eventually_changes_something() {
        let mut rng = StdRng::seed_from_u64(3);
        let space = ActionSpace::cardinal();
        let original = Solution::new(vec![Action::UP; 4]);
        let changed = (0..100).any(|_| mutate(&original, &space, &mut rng) != original);
        assert!(changed);
    }

    #[test]
    #[should_panic(expected = "cannot mutate an empty solution")]
    fn test_mutate_empty_panics() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut empty = Solution::default();
        mutate_in_place(&mut empty, &ActionSpace::cardinal(), &mut rng);
    }

    // ---- Crossover ----

    #[test]
    fn test_crossover_known_trace() {
        let a = Action::new(1, 0);
        let b = Action::new(2, 0);
        let c = Action::new(3, 0);
        let p1 = Solution::new(vec![a, b, c]);
        let p2 = Solution::new(vec![c, a, b]);

        // slot 0: p1[0]=a fresh, flip to p2
        // slot 1: p2[1]=a used, p1[1]=b fresh, stay on p2
        // slot 2: p2[2]=b used, p1[2]=c fresh
        let child = crossover(&p1, &p2).unwrap();
        assert_eq!(child.actions(), &[a, b, c]);
    }

    #[test]
    fn test_crossover_alternates_between_parents() {
        let p1 = Solution::new(distinct_line(4));
        let p2 = Solution::new((10..14).map(|i| Action::new(i, 0)).collect());

        let child = crossover(&p1, &p2).unwrap();
        assert_eq!(
            child.actions(),
            &[
                Action::new(0, 0),
                Action::new(11, 0),
                Action::new(2, 0),
                Action::new(13, 0),
            ]
        );
    }

    #[test]
    fn test_crossover_permutations_stay_permutations() {
        let mut rng = StdRng::seed_from_u64(42);
        let genes = distinct_line(8);
        for _ in 0..100 {
            let mut g1 = genes.clone();
            let mut g2 = genes.clone();
            rand::seq::SliceRandom::shuffle(g1.as_mut_slice(), &mut rng);
            rand::seq::SliceRandom::shuffle(g2.as_mut_slice(), &mut rng);

            let child = crossover(&Solution::new(g1), &Solution::new(g2)).unwrap();
            assert_eq!(child.len(), 8);
            assert!(!has_duplicates(&child), "duplicate genes in {child}");
        }
    }

    #[test]
    fn test_crossover_poor_alphabet_terminates() {
        let a = Action::new(1, 0);
        let b = Action::new(0, 1);
        let p1 = Solution::new(vec![a, a, a]);
        let p2 = Solution::new(vec![b, b, b]);

        let child = crossover(&p1, &p2).unwrap();
        assert_eq!(child.actions(), &[a, b, a]);
    }

    #[test]
    fn test_crossover_identical_single_gene_parents() {
        let p = Solution::new(vec![Action::UP; 5]);
        let child = crossover(&p, &p).unwrap();
        assert_eq!(child, p);
    }

    #[test]
    fn test_crossover_empty_parents() {
        let child = crossover(&Solution::default(), &Solution::default()).unwrap();
        assert!(child.is_empty());
    }

    #[test]
    fn test_crossover_length_mismatch() {
        let p1 = Solution::new(vec![Action::UP; 3]);
        let p2 = Solution::new(vec![Action::UP; 2]);
        assert_eq!(
            crossover(&p1, &p2),
            Err(SearchError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_crossover_does_not_touch_parents() {
        let p1 = Solution::new(distinct_line(5));
        let p2 = Solution::new(distinct_line(5).into_iter().rev().collect());
        let (s1, s2) = (p1.clone(), p2.clone());
        let _ = crossover(&p1, &p2).unwrap();
        assert_eq!(p1, s1);
        assert_eq!(p2, s2);
    }

    // ---- Properties ----

    fn action_strategy() -> impl Strategy<Value = Action> {
        (-6i32..6, -6i32..6).prop_map(|(dx, dy)| Action::new(dx, dy))
    }

    proptest! {
        #[test]
        fn prop_mutate_differs_in_at_most_one_position(
            genes in prop::collection::vec(action_strategy(), 1..30),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let original = Solution::new(genes);
            let child = mutate(&original, &ActionSpace::octile(), &mut rng);
            prop_assert_eq!(child.len(), original.len());
            prop_assert!(child.hamming_distance(&original).unwrap() <= 1);
        }

        #[test]
        fn prop_crossover_preserves_length(
            pair in (1usize..25).prop_flat_map(|n| (
                prop::collection::vec(action_strategy(), n),
                prop::collection::vec(action_strategy(), n),
            )),
        ) {
            let (g1, g2) = pair;
            let child = crossover(&Solution::new(g1.clone()), &Solution::new(g2)).unwrap();
            prop_assert_eq!(child.len(), g1.len());
        }

        #[test]
        fn prop_crossover_no_duplicates_with_rich_parents(
            pair in (1usize..25).prop_flat_map(|n| (
                prop::collection::vec(action_strategy(), n),
                prop::collection::vec(action_strategy(), n),
            )),
        ) {
            let (g1, g2) = pair;
            let distinct: HashSet<Action> = g1.iter().chain(g2.iter()).copied().collect();
            prop_assume!(distinct.len() >= g1.len());

            let child = crossover(&Solution::new(g1), &Solution::new(g2)).unwrap();
            prop_assert!(!has_duplicates(&child));
        }
    }
}
