// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Cycle decomposition and greedy cycle merging.
//!
//! A perfect assignment is a permutation; following it as a successor
//! function partitions the cities into disjoint cycles. Merging two
//! cycles swaps the successors of one city from each, paying the
//! cheapest swap premium found by a full pairwise scan. The merge is
//! greedy and feasible, not optimal.

use waymark_model::{index::CityIndex, model::Model};
use waymark_search::num::SolverFloat;

/// Decomposes a permutation into its cycles, ordered by descending
/// length. The ordering is deterministic: equal-length cycles keep the
/// order of their smallest members.
pub fn cycle_decomposition(matching: &[usize]) -> Vec<Vec<usize>> {
    let n = matching.len();
    let mut used = vec![false; n];
    let mut cycles = Vec::new();

    for start in 0..n {
        if used[start] {
            continue;
        }
        used[start] = true;
        let mut cycle = vec![start];
        let mut current = matching[start];
        while current != start {
            used[current] = true;
            cycle.push(current);
            current = matching[current];
        }
        cycles.push(cycle);
    }

    // Stable sort keeps equal-length cycles in discovery order.
    cycles.sort_by_key(|cycle| std::cmp::Reverse(cycle.len()));
    cycles
}

/// The incremental cost of swapping the successors of `i` and `j`:
/// the two inserted edges minus the two removed ones. Infinite if
/// either inserted edge is infeasible; removed edges came from the
/// matching and are finite whenever the matching itself is.
#[inline]
fn swap_delta<T>(model: &Model<T>, matching: &[usize], i: usize, j: usize) -> T
where
    T: SolverFloat,
{
    let inserted_ij = model.cost(CityIndex::new(i), CityIndex::new(matching[j]));
    let inserted_ji = model.cost(CityIndex::new(j), CityIndex::new(matching[i]));
    if !inserted_ij.is_finite() || !inserted_ji.is_finite() {
        return T::infinity();
    }

    let removed_i = model.cost(CityIndex::new(i), CityIndex::new(matching[i]));
    let removed_j = model.cost(CityIndex::new(j), CityIndex::new(matching[j]));
    inserted_ij + inserted_ji - removed_i - removed_j
}

/// Merges `cycle1` and `cycle2` into one cycle by swapping successors
/// of the pair `(i in cycle1, j in cycle2)` with the minimal swap
/// premium. On ties the first pair found wins, scanning `cycle1` outer
/// and `cycle2` inner. The matching stays a bijection.
///
/// # Panics
///
/// In debug builds, panics if either cycle is empty.
pub fn merge_cycle_pair<T>(model: &Model<T>, matching: &mut [usize], cycle1: &[usize], cycle2: &[usize])
where
    T: SolverFloat,
{
    debug_assert!(
        !cycle1.is_empty() && !cycle2.is_empty(),
        "called `merge_cycle_pair` with an empty cycle"
    );

    let mut min_delta = swap_delta(model, matching, cycle1[0], cycle2[0]);
    let mut min_swap = (cycle1[0], cycle2[0]);
    for i in cycle1.iter().copied() {
        for j in cycle2.iter().copied() {
            let delta = swap_delta(model, matching, i, j);
            if delta < min_delta {
                min_delta = delta;
                min_swap = (i, j);
            }
        }
    }

    let (i, j) = min_swap;
    let next_i = matching[i];
    let next_j = matching[j];
    matching[i] = next_j;
    matching[j] = next_i;
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_model::model::ModelBuilder;

    fn is_bijection(matching: &[usize]) -> bool {
        let mut seen = vec![false; matching.len()];
        for col in matching {
            if *col >= matching.len() || seen[*col] {
                return false;
            }
            seen[*col] = true;
        }
        true
    }

    #[test]
    fn test_decomposition_partitions_all_indices() {
        // Permutation (0 1 2)(3 4)(5).
        let matching = vec![1, 2, 0, 4, 3, 5];
        let cycles = cycle_decomposition(&matching);

        assert_eq!(cycles.len(), 3);

        let mut all: Vec<usize> = cycles.iter().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_decomposition_orders_by_descending_length() {
        let matching = vec![0, 2, 1, 4, 5, 3];
        let cycles = cycle_decomposition(&matching);

        assert_eq!(cycles[0].len(), 3);
        assert_eq!(cycles[1].len(), 2);
        assert_eq!(cycles[2].len(), 1);
        assert_eq!(cycles[0], vec![3, 4, 5]);
    }

    #[test]
    fn test_single_cycle_decomposition() {
        let matching = vec![1, 2, 3, 0];
        let cycles = cycle_decomposition(&matching);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0], vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_merge_reduces_cycle_count_by_one() {
        let model = ModelBuilder::new(6).build_with(|_from, _to| 1.0).unwrap();

        // (0 1 2)(3 4 5)
        let mut matching = vec![1, 2, 0, 4, 5, 3];
        let cycles = cycle_decomposition(&matching);
        assert_eq!(cycles.len(), 2);

        merge_cycle_pair(&model, &mut matching, &cycles[0], &cycles[1]);

        assert!(is_bijection(&matching));
        assert_eq!(cycle_decomposition(&matching).len(), 1);
    }

    #[test]
    fn test_merge_picks_cheapest_swap() {
        // 4 cities, two 2-cycles (0 1)(2 3). Make the swap through the
        // pair (0, 2) clearly cheapest.
        let model = ModelBuilder::new(4)
            .build_with(|from, to| match (from.get(), to.get()) {
                (0, 3) | (2, 1) => 1.0,
                _ => 10.0,
            })
            .unwrap();

        let mut matching = vec![1, 0, 3, 2];
        let cycles = cycle_decomposition(&matching);
        merge_cycle_pair(&model, &mut matching, &cycles[0], &cycles[1]);

        // Swapping successors of 0 and 2: match[0] = 3, match[2] = 1.
        assert_eq!(matching, vec![3, 0, 1, 2]);
        assert_eq!(cycle_decomposition(&matching).len(), 1);
    }

    #[test]
    fn test_merge_avoids_infeasible_insertions() {
        // The swap through (0, 2) would insert an infinite edge; the
        // merge must pick a finite alternative.
        let model = ModelBuilder::new(4)
            .build_with(|from, to| match (from.get(), to.get()) {
                (0, 3) => f64::INFINITY,
                _ => 1.0,
            })
            .unwrap();

        let mut matching = vec![1, 0, 3, 2];
        let cycles = cycle_decomposition(&matching);
        merge_cycle_pair(&model, &mut matching, &cycles[0], &cycles[1]);

        assert!(is_bijection(&matching));
        assert_eq!(cycle_decomposition(&matching).len(), 1);
        assert_ne!(matching[0], 3, "infeasible insertion must not be chosen");
    }
}
