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

use waymark_model::tour::Tour;
use waymark_search::num::SolverFloat;

/// The best complete tour found so far during one search run. Every
/// pruning decision reads its cost; it is replaced only by a strictly
/// cheaper tour.
#[derive(Debug, Clone, Default)]
pub struct Incumbent<T> {
    best: Option<Tour<T>>,
}

impl<T> Incumbent<T>
where
    T: SolverFloat,
{
    /// Creates an empty incumbent with an infinite upper bound.
    #[inline]
    pub fn new() -> Self {
        Self { best: None }
    }

    /// Creates an incumbent seeded with a baseline tour. Only feasible
    /// tours tighten the bound; an infeasible seed is discarded.
    #[inline]
    pub fn seeded(baseline: Tour<T>) -> Self {
        let mut incumbent = Self::new();
        incumbent.try_install(baseline);
        incumbent
    }

    /// Installs the tour if it is feasible and strictly cheaper than
    /// the current best. Returns true if the tour was installed.
    pub fn try_install(&mut self, tour: Tour<T>) -> bool {
        if !tour.is_feasible() || tour.cost() >= self.upper_bound() {
            return false;
        }
        self.best = Some(tour);
        true
    }

    /// The cost of the best tour, or infinity if none is held.
    #[inline]
    pub fn upper_bound(&self) -> T {
        match &self.best {
            Some(tour) => tour.cost(),
            None => T::infinity(),
        }
    }

    /// The best tour held, if any.
    #[inline]
    pub fn best(&self) -> Option<&Tour<T>> {
        self.best.as_ref()
    }

    /// Consumes the incumbent and returns the best tour, if any.
    #[inline]
    pub fn into_best(self) -> Option<Tour<T>> {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_model::{index::CityIndex, model::ModelBuilder};

    fn tour_with_cost(scale: f64) -> Tour<f64> {
        let model = ModelBuilder::new(3)
            .build_with(|_from, _to| scale)
            .unwrap();
        let order = vec![CityIndex::new(0), CityIndex::new(1), CityIndex::new(2)];
        Tour::from_order(&model, order)
    }

    #[test]
    fn test_empty_incumbent_has_infinite_bound() {
        let incumbent = Incumbent::<f64>::new();
        assert_eq!(incumbent.upper_bound(), f64::INFINITY);
        assert!(incumbent.best().is_none());
    }

    #[test]
    fn test_strictly_cheaper_tours_replace() {
        let mut incumbent = Incumbent::new();
        assert!(incumbent.try_install(tour_with_cost(2.0)));
        assert_eq!(incumbent.upper_bound(), 6.0);

        // Equal cost must not replace.
        assert!(!incumbent.try_install(tour_with_cost(2.0)));

        assert!(incumbent.try_install(tour_with_cost(1.0)));
        assert_eq!(incumbent.upper_bound(), 3.0);
    }

    #[test]
    fn test_infeasible_seed_is_discarded() {
        let model = ModelBuilder::new(3)
            .build_with(|_from, _to| f64::INFINITY)
            .unwrap();
        let order = vec![CityIndex::new(0), CityIndex::new(1), CityIndex::new(2)];
        let infeasible = Tour::from_order(&model, order);

        let incumbent = Incumbent::seeded(infeasible);
        assert!(incumbent.best().is_none());
        assert_eq!(incumbent.upper_bound(), f64::INFINITY);
    }
}
