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

//! The assignment-relaxation heuristic driver.
//!
//! Solves the relaxation (a minimum-cost perfect assignment), then
//! repeatedly merges the two largest remaining cycles until the
//! permutation is a single Hamiltonian cycle. The time budget is
//! checked once per merge iteration; a single assignment solve or merge
//! scan is not interruptible.

use crate::{
    cycle::{cycle_decomposition, merge_cycle_pair},
    hungarian::{min_cost_assignment, AssignmentError},
};
use std::time::{Duration, Instant};
use waymark_model::{index::CityIndex, model::Model, tour::Tour};
use waymark_search::{num::SolverFloat, result::SolverResult};

/// Result of one heuristic run.
#[derive(Debug, Clone)]
pub struct HeuristicOutcome<T> {
    result: SolverResult<T>,
    merge_iterations: u64,
    time_total: Duration,
}

impl<T> HeuristicOutcome<T> {
    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// The number of cycle merges performed. Zero when the optimal
    /// assignment already formed a single cycle.
    #[inline]
    pub fn merge_iterations(&self) -> u64 {
        self.merge_iterations
    }

    /// Total time spent in the heuristic.
    #[inline]
    pub fn time_total(&self) -> Duration {
        self.time_total
    }
}

impl<T> std::fmt::Display for HeuristicOutcome<T>
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HeuristicOutcome(result: {}, merges: {}, time: {:.2?})",
            self.result, self.merge_iterations, self.time_total
        )
    }
}

/// The assignment-relaxation tour heuristic. Stateless; one call per
/// run.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentHeuristic<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> AssignmentHeuristic<T>
where
    T: SolverFloat,
{
    /// Creates a new heuristic instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }

    /// Runs the heuristic on the given model within the time budget.
    ///
    /// An infeasible relaxation proves that no tour exists at all: a
    /// Hamiltonian cycle is itself a perfect assignment. Budget expiry
    /// mid-merge yields an unknown result; the partially merged
    /// permutation is not a tour.
    pub fn solve(&self, model: &Model<T>, time_budget: Duration) -> HeuristicOutcome<T> {
        let start_time = Instant::now();

        let assignment = match min_cost_assignment(model.cost_table(), model.num_cities()) {
            Ok(assignment) => assignment,
            Err(AssignmentError::Infeasible) => {
                log::debug!("assignment relaxation is infeasible; no tour exists");
                return HeuristicOutcome {
                    result: SolverResult::Infeasible,
                    merge_iterations: 0,
                    time_total: start_time.elapsed(),
                };
            }
            Err(AssignmentError::NotSquare { .. }) => {
                // The model always hands out a square table.
                unreachable!("model cost table is square by construction")
            }
        };

        log::debug!(
            "assignment relaxation cost: {} (lower bound on the optimal tour)",
            assignment.cost()
        );

        let mut matching = assignment.into_matching();
        let mut cycles = cycle_decomposition(&matching);
        let mut merge_iterations = 0u64;

        while cycles.len() > 1 {
            if start_time.elapsed() >= time_budget {
                return HeuristicOutcome {
                    result: SolverResult::Unknown,
                    merge_iterations,
                    time_total: start_time.elapsed(),
                };
            }

            merge_cycle_pair(model, &mut matching, &cycles[0], &cycles[1]);
            merge_iterations += 1;
            cycles = cycle_decomposition(&matching);
        }

        // Follow the single cycle's successors starting at city 0.
        let n = model.num_cities();
        let mut order = Vec::with_capacity(n);
        let mut current = 0usize;
        for _ in 0..n {
            order.push(CityIndex::new(current));
            current = matching[current];
        }

        let tour = Tour::from_order(model, order);
        let result = if tour.is_feasible() {
            SolverResult::Feasible(tour)
        } else {
            // A merge had no finite swap available; the resulting
            // permutation is a cycle but not a usable tour.
            SolverResult::Unknown
        };

        HeuristicOutcome {
            result,
            merge_iterations,
            time_total: start_time.elapsed(),
        }
    }
}
