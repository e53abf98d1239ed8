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

use std::time::Duration;

/// Statistics collected during one branch-and-bound search run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BnbStatistics {
    /// Total improving tours installed as the incumbent.
    pub solutions_found: u64,
    /// Total child nodes created by expansion. The root is not counted.
    pub nodes_created: u64,
    /// Nodes discarded because their bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Nodes discarded because no tour can complete their path.
    pub prunings_infeasible: u64,
    /// The largest frontier size observed at any point.
    pub max_frontier_len: u64,
    /// Total time spent in the search.
    pub time_total: Duration,
}

impl BnbStatistics {
    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_node_created(&mut self) {
        self.nodes_created = self.nodes_created.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    /// Records nodes discarded in bulk, e.g. the frontier remainder
    /// when the time budget expires.
    #[inline]
    pub fn on_prunings_bound_bulk(&mut self, count: u64) {
        self.prunings_bound = self.prunings_bound.saturating_add(count);
    }

    #[inline]
    pub fn on_frontier_len(&mut self, len: u64) {
        self.max_frontier_len = self.max_frontier_len.max(len);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Total nodes pruned for any reason.
    #[inline]
    pub fn total_pruned(&self) -> u64 {
        self.prunings_bound.saturating_add(self.prunings_infeasible)
    }
}

impl std::fmt::Display for BnbStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Waymark-BnB Search Statistics:")?;
        writeln!(f, "  Nodes created:        {}", self.nodes_created)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (infeasible):{}", self.prunings_infeasible)?;
        writeln!(f, "  Max frontier size:    {}", self.max_frontier_len)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
