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

//! # Tour Solver Facade
//!
//! A high-level entry point over the two Waymark engines: the exact
//! branch-and-bound search and the assignment-relaxation heuristic.
//! The facade owns the validated scenario model and wires up the
//! monitor stack (time limit plus progress logging) for each run.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use waymark_solver::solver::TourSolver;
//!
//! // Four cities on a unit ring; everything else costs 5.
//! let solver = TourSolver::<f64>::configure(4, |from, to| {
//!     if (to + 4 - from) % 4 == 1 { 1.0 } else { 5.0 }
//! })
//! .unwrap();
//!
//! let outcome = solver.run_exact_search(Duration::from_secs(10));
//! assert!(outcome.result().is_optimal());
//! ```

use std::time::Duration;
use waymark_assign::heuristic::{AssignmentHeuristic, HeuristicOutcome};
use waymark_bnb::{bnb::BnbSolver, result::BnbOutcome};
use waymark_model::{
    error::ModelError,
    model::{Model, ModelBuilder},
};
use waymark_search::{
    baseline::BaselineProvider,
    monitor::{composite::CompositeMonitor, log::LogMonitor, time_limit::TimeLimitMonitor},
    num::SolverFloat,
};

/// The facade over both tour engines. Owns the scenario model; one
/// instance can run any number of searches.
#[derive(Debug, Clone)]
pub struct TourSolver<T> {
    model: Model<T>,
}

impl<T> TourSolver<T>
where
    T: SolverFloat,
{
    /// Registers a scenario: `cost_fn(from, to)` returns a nonnegative
    /// real or infinity for each ordered city pair, and need not be
    /// symmetric. Diagonal entries are forced to infinity regardless of
    /// what the function returns.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the scenario is empty or any cost is
    /// negative or NaN.
    pub fn configure<F>(num_cities: usize, cost_fn: F) -> Result<Self, ModelError>
    where
        F: Fn(usize, usize) -> T,
    {
        let model = ModelBuilder::new(num_cities).build_with(|from, to| cost_fn(from.get(), to.get()))?;
        Ok(Self { model })
    }

    /// Wraps an already-built model.
    #[inline]
    pub fn from_model(model: Model<T>) -> Self {
        Self { model }
    }

    /// The scenario model.
    #[inline]
    pub fn model(&self) -> &Model<T> {
        &self.model
    }

    /// Runs the exact branch-and-bound search with an empty incumbent.
    pub fn run_exact_search(&self, time_budget: Duration) -> BnbOutcome<T> {
        let mut solver = BnbSolver::new();
        solver.solve(&self.model, self.monitor_stack(time_budget))
    }

    /// Runs the exact search with the incumbent seeded by the given
    /// baseline provider, so pruning starts from a finite threshold.
    pub fn run_exact_search_with_baseline<B>(
        &self,
        time_budget: Duration,
        baseline: &B,
    ) -> BnbOutcome<T>
    where
        B: BaselineProvider<T> + ?Sized,
    {
        let mut solver = BnbSolver::new();
        solver.solve_with_baseline(&self.model, baseline, self.monitor_stack(time_budget))
    }

    /// Runs the assignment-relaxation heuristic.
    pub fn run_assignment_heuristic(&self, time_budget: Duration) -> HeuristicOutcome<T> {
        let heuristic = AssignmentHeuristic::new();
        let outcome = heuristic.solve(&self.model, time_budget);
        log::info!("{}", outcome);
        outcome
    }

    fn monitor_stack(&self, time_budget: Duration) -> CompositeMonitor<'static, T> {
        let mut monitor = CompositeMonitor::new();
        monitor.add_monitor(TimeLimitMonitor::new(time_budget));
        monitor.add_monitor(LogMonitor::default());
        monitor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_search::result::SolverResult;

    #[test]
    fn test_configure_rejects_empty_scenario() {
        let result = TourSolver::<f64>::configure(0, |_from, _to| 1.0);
        assert!(matches!(result, Err(ModelError::EmptyScenario)));
    }

    #[test]
    fn test_configure_rejects_negative_costs() {
        let result = TourSolver::<f64>::configure(3, |_from, _to| -1.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_exact_search_on_trivial_instance() {
        let solver = TourSolver::<f64>::configure(3, |_from, _to| 1.0).unwrap();
        let outcome = solver.run_exact_search(Duration::from_secs(10));

        let tour = match outcome.result() {
            SolverResult::Optimal(tour) => tour,
            other => panic!("expected optimal result, got {}", other),
        };
        assert_eq!(tour.cost(), 3.0);
    }
}
