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

//! Branch-and-bound search nodes.
//!
//! A node is a partial tour: the ordered path of visited cities, an
//! O(1) visited set, an exclusively owned reduced cost matrix, and the
//! admissible lower bound established by reduction. Expanding a node
//! copies the matrix; parent and child never alias storage.

use crate::reduce::ReducedMatrix;
use fixedbitset::FixedBitSet;
use waymark_model::{index::CityIndex, model::Model};
use waymark_search::num::SolverFloat;

/// A single node of the branch-and-bound tree. Immutable after
/// construction.
#[derive(Debug, Clone)]
pub struct SearchNode<T> {
    path: Vec<CityIndex>,
    visited: FixedBitSet,
    matrix: ReducedMatrix<T>,
    lower_bound: T,
}

impl<T> SearchNode<T>
where
    T: SolverFloat,
{
    /// Builds the root node: the full reduced cost matrix and a path
    /// seeded with the first city.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the model has no cities. The model
    /// builder already rejects empty scenarios.
    pub fn root(model: &Model<T>) -> Self {
        debug_assert!(
            model.num_cities() > 0,
            "called `SearchNode::root` with an empty model"
        );

        let mut matrix = ReducedMatrix::from_model(model);
        let lower_bound = matrix.reduce(T::zero());

        let start = CityIndex::new(0);
        let mut visited = FixedBitSet::with_capacity(model.num_cities());
        visited.insert(start.get());

        Self {
            path: vec![start],
            visited,
            matrix,
            lower_bound,
        }
    }

    /// Builds the child node that extends this path by `child_city`.
    ///
    /// The edge cost is read before the parent's row and the child's
    /// column are blocked; it is added exactly once to the running
    /// bound before reduction. Adding it after blocking (or not at all)
    /// would make the bound too optimistic and the search unsound.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `child_city` was already visited.
    pub fn expand(&self, child_city: CityIndex) -> Self {
        debug_assert!(
            !self.visited.contains(child_city.get()),
            "called `SearchNode::expand` with already visited city: {}",
            child_city
        );

        let parent_city = self.last_city();

        let mut matrix = self.matrix.clone();
        let edge_cost = matrix.get(parent_city, child_city);
        matrix.block_row(parent_city);
        matrix.block_column(child_city);

        let lower_bound = matrix.reduce(self.lower_bound + edge_cost);

        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(child_city);

        let mut visited = self.visited.clone();
        visited.insert(child_city.get());

        Self {
            path,
            visited,
            matrix,
            lower_bound,
        }
    }

    /// Builds one child per unvisited city, in city-index order. The
    /// fixed enumeration order keeps frontier tie-breaking
    /// deterministic.
    pub fn make_children(&self, model: &Model<T>) -> Vec<SearchNode<T>> {
        (0..model.num_cities())
            .filter(|city| !self.visited.contains(*city))
            .map(|city| self.expand(CityIndex::new(city)))
            .collect()
    }

    /// Returns true if this partial path cannot be completed: some
    /// city that still needs an outgoing edge has an all-infinite row,
    /// or some city that still needs an incoming edge has an
    /// all-infinite column. Live rows are the unvisited cities plus
    /// the path tail; live columns are the unvisited cities plus the
    /// start city (the closing edge).
    ///
    /// Only meaningful for nodes with unvisited cities left; a
    /// complete path is scored by its closing edge instead.
    pub fn is_dead_end(&self) -> bool {
        let n = self.matrix.num_cities();
        let start = self.path[0];
        let last = self.last_city();

        for city in 0..n {
            let index = CityIndex::new(city);
            let unvisited = !self.visited.contains(city);

            if (unvisited || index == last) && !self.matrix.row_has_finite(index) {
                return true;
            }
            if (unvisited || index == start) && !self.matrix.column_has_finite(index) {
                return true;
            }
        }
        false
    }

    /// The number of cities on the path.
    #[inline]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// The partial path, in visit order.
    #[inline]
    pub fn path(&self) -> &[CityIndex] {
        &self.path
    }

    /// The most recently visited city.
    #[inline]
    pub fn last_city(&self) -> CityIndex {
        self.path[self.path.len() - 1]
    }

    /// The admissible lower bound on any tour completing this path.
    #[inline]
    pub fn lower_bound(&self) -> T {
        self.lower_bound
    }

    /// The frontier priority key: the lower bound normalized by depth.
    /// Favors deeper partial paths over merely low-bound shallow ones;
    /// a heuristic ordering, not a cost estimate.
    #[inline]
    pub fn priority(&self) -> T {
        match T::from_usize(self.path.len()) {
            Some(depth) => self.lower_bound / depth,
            None => self.lower_bound,
        }
    }
}

impl<T> std::fmt::Display for SearchNode<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchNode(depth: {}, lower_bound: {}, last: {})",
            self.depth(),
            self.lower_bound,
            self.last_city()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_model::model::ModelBuilder;

    const INF: f64 = f64::INFINITY;

    /// 4-city unit ring: 0->1->2->3->0 costs 1, everything else 5.
    fn ring_model() -> Model<f64> {
        ModelBuilder::new(4)
            .build_with(|from, to| {
                if (to.get() + 4 - from.get()) % 4 == 1 {
                    1.0
                } else {
                    5.0
                }
            })
            .unwrap()
    }

    #[test]
    fn test_root_node_shape() {
        let model = ring_model();
        let root = SearchNode::root(&model);

        assert_eq!(root.depth(), 1);
        assert_eq!(root.path(), &[CityIndex::new(0)]);
        assert_eq!(root.last_city(), CityIndex::new(0));
        // Every row minimum is 1, so the root bound is at least 4.
        assert!(root.lower_bound() >= 4.0);
        assert!(root.lower_bound().is_finite());
    }

    #[test]
    fn test_expand_accounts_edge_cost_once() {
        let model = ring_model();
        let root = SearchNode::root(&model);
        let child = root.expand(CityIndex::new(1));

        assert_eq!(child.depth(), 2);
        assert_eq!(child.path(), &[CityIndex::new(0), CityIndex::new(1)]);
        // The bound never decreases along an edge.
        assert!(child.lower_bound() >= root.lower_bound());
        // Extending along the ring keeps the bound at the tour optimum.
        assert!(child.lower_bound() <= 4.0 + f64::EPSILON);
    }

    #[test]
    fn test_expand_blocks_parent_row_and_child_column() {
        let model = ring_model();
        let root = SearchNode::root(&model);
        let child = root.expand(CityIndex::new(1));

        // Parent row and child column are gone from the child's matrix;
        // the child can no longer be re-entered nor the parent re-left.
        let grandchild = child.expand(CityIndex::new(2));
        assert!(!grandchild
            .path()
            .iter()
            .skip(1)
            .any(|c| *c == CityIndex::new(0)));
        assert_eq!(grandchild.depth(), 3);
    }

    #[test]
    fn test_make_children_enumerates_unvisited_in_index_order() {
        let model = ring_model();
        let root = SearchNode::root(&model);
        let children = root.make_children(&model);

        assert_eq!(children.len(), 3);
        let last_cities: Vec<usize> = children.iter().map(|c| c.last_city().get()).collect();
        assert_eq!(last_cities, vec![1, 2, 3]);
    }

    #[test]
    fn test_priority_normalizes_by_depth() {
        let model = ring_model();
        let root = SearchNode::root(&model);
        let child = root.expand(CityIndex::new(1));

        assert_eq!(root.priority(), root.lower_bound());
        assert_eq!(child.priority(), child.lower_bound() / 2.0);
    }

    #[test]
    fn test_dead_end_detection_on_blocked_city() {
        // City 2 has no outgoing edges at all.
        let model = ModelBuilder::new(3)
            .build_with(|from, _to| if from.get() == 2 { INF } else { 1.0 })
            .unwrap();
        let root = SearchNode::root(&model);

        assert!(root.is_dead_end());
    }

    #[test]
    fn test_live_paths_are_not_dead_ends() {
        let model = ring_model();
        let root = SearchNode::root(&model);
        assert!(!root.is_dead_end());

        let child = root.expand(CityIndex::new(1));
        assert!(!child.is_dead_end());
    }
}
