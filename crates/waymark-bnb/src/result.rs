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

use crate::stats::BnbStatistics;
use waymark_model::tour::Tour;
use waymark_search::result::{SolverResult, TerminationReason};

/// Result of the branch-and-bound search after termination.
#[derive(Debug, Clone)]
pub struct BnbOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: BnbStatistics,
}

impl<T> BnbOutcome<T> {
    /// The frontier emptied before the deadline: the held tour is
    /// provably optimal.
    #[inline]
    pub fn optimal(tour: Tour<T>, statistics: BnbStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(tour),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// No tour exists.
    #[inline]
    pub fn infeasible(statistics: BnbStatistics) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// The search stopped early. The best tour held at that point, if
    /// any, is still feasible but not proven optimal.
    #[inline]
    pub fn aborted<R>(tour: Option<Tour<T>>, reason: R, statistics: BnbStatistics) -> Self
    where
        R: Into<String>,
    {
        let result = match tour {
            Some(tour) => SolverResult::Feasible(tour),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the search statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbStatistics {
        &self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_model::{index::CityIndex, model::ModelBuilder};

    fn unit_tour() -> Tour<f64> {
        let model = ModelBuilder::new(3).build_with(|_from, _to| 1.0).unwrap();
        let order = vec![CityIndex::new(0), CityIndex::new(1), CityIndex::new(2)];
        Tour::from_order(&model, order)
    }

    #[test]
    fn test_optimal_outcome() {
        let outcome = BnbOutcome::optimal(unit_tour(), BnbStatistics::default());
        assert!(outcome.result().is_optimal());
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::OptimalityProven
        ));
    }

    #[test]
    fn test_aborted_without_tour_is_unknown() {
        let outcome = BnbOutcome::<f64>::aborted(None, "time limit", BnbStatistics::default());
        assert!(matches!(outcome.result(), SolverResult::Unknown));
        match outcome.termination_reason() {
            TerminationReason::Aborted(msg) => assert_eq!(msg, "time limit"),
            _ => panic!("expected aborted termination reason"),
        }
    }

    #[test]
    fn test_aborted_with_tour_is_feasible() {
        let outcome = BnbOutcome::aborted(Some(unit_tour()), "time limit", BnbStatistics::default());
        assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
        assert!(outcome.result().has_tour());
    }
}
