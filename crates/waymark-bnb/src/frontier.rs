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

//! Best-first frontier.
//!
//! Live nodes are ordered by their normalized lower bound (lower pops
//! first). Ties are broken by a monotonically increasing insertion
//! sequence number, giving the search a fully deterministic total order
//! over nodes regardless of how the underlying heap sifts equal keys.

use crate::node::SearchNode;
use std::{cmp::Ordering, collections::BinaryHeap};
use waymark_search::num::SolverFloat;

#[derive(Debug)]
struct FrontierEntry<T> {
    priority: T,
    seq: u64,
    node: SearchNode<T>,
}

impl<T> PartialEq for FrontierEntry<T>
where
    T: SolverFloat,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for FrontierEntry<T> where T: SolverFloat {}

impl<T> PartialOrd for FrontierEntry<T>
where
    T: SolverFloat,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for FrontierEntry<T>
where
    T: SolverFloat,
{
    // Reversed so that `BinaryHeap` (a max-heap) pops the minimal
    // priority first. Priorities are never NaN: bounds are nonnegative
    // finite or infinite and depths are at least one.
    fn cmp(&self, other: &Self) -> Ordering {
        match other.priority.partial_cmp(&self.priority) {
            Some(ordering) => ordering.then_with(|| other.seq.cmp(&self.seq)),
            None => other.seq.cmp(&self.seq),
        }
    }
}

/// A min-priority queue of live search nodes that tracks the largest
/// size it ever reached.
#[derive(Debug)]
pub struct Frontier<T> {
    heap: BinaryHeap<FrontierEntry<T>>,
    next_seq: u64,
    max_len: usize,
}

impl<T> Default for Frontier<T>
where
    T: SolverFloat,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Frontier<T>
where
    T: SolverFloat,
{
    /// Creates a new empty frontier.
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
            max_len: 0,
        }
    }

    /// Pushes a node, stamping it with the next insertion sequence
    /// number.
    pub fn push(&mut self, node: SearchNode<T>) {
        let entry = FrontierEntry {
            priority: node.priority(),
            seq: self.next_seq,
            node,
        };
        self.next_seq += 1;
        self.heap.push(entry);
        self.max_len = self.max_len.max(self.heap.len());
    }

    /// Pops the node with the minimal priority key; among equal keys,
    /// the earliest inserted.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchNode<T>> {
        self.heap.pop().map(|entry| entry.node)
    }

    /// The number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no live nodes remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The largest number of live nodes observed at any point.
    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_model::{index::CityIndex, model::ModelBuilder};

    /// All off-diagonal edges cost 1, so sibling children share bounds.
    fn uniform_model(num_cities: usize) -> waymark_model::model::Model<f64> {
        ModelBuilder::new(num_cities)
            .build_with(|_from, _to| 1.0)
            .unwrap()
    }

    #[test]
    fn test_pop_returns_minimal_priority_first() {
        let model = uniform_model(3);
        let root = SearchNode::root(&model);
        let child = root.expand(CityIndex::new(1));

        // The child is deeper with the same bound, so it has the
        // smaller normalized priority.
        assert!(child.priority() < root.priority());

        let mut frontier = Frontier::new();
        frontier.push(root);
        frontier.push(child);

        let first = frontier.pop().unwrap();
        assert_eq!(first.depth(), 2);
        let second = frontier.pop().unwrap();
        assert_eq!(second.depth(), 1);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_equal_priorities_pop_in_insertion_order() {
        let model = uniform_model(3);
        let root = SearchNode::root(&model);
        let children = root.make_children(&model);

        // Both children extend the uniform instance by one unit edge.
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].priority(), children[1].priority());

        let mut frontier = Frontier::new();
        for child in children {
            frontier.push(child);
        }

        assert_eq!(frontier.pop().unwrap().last_city(), CityIndex::new(1));
        assert_eq!(frontier.pop().unwrap().last_city(), CityIndex::new(2));
    }

    #[test]
    fn test_max_len_tracks_high_water_mark() {
        let model = uniform_model(4);
        let root = SearchNode::root(&model);

        let mut frontier = Frontier::new();
        for child in root.make_children(&model) {
            frontier.push(child);
        }
        assert_eq!(frontier.max_len(), 3);

        frontier.pop();
        frontier.pop();
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.max_len(), 3, "high-water mark must not shrink");
    }
}
