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

//! # Baseline Providers
//!
//! The exact search seeds its incumbent with a feasible tour obtained from
//! an external collaborator before the first node is expanded. The search
//! never depends on how that baseline was produced; it only uses the
//! baseline cost as the initial pruning threshold. This module declares the
//! seam (`BaselineProvider`) and a trivial adapter (`SeedTour`) wrapping a
//! precomputed tour.

use crate::num::SolverFloat;
use waymark_model::{model::Model, tour::Tour};

/// A collaborator that supplies an initial feasible tour for a scenario.
///
/// Returning `None` means the provider could not produce a tour; the exact
/// search then starts from an unbounded incumbent and the first completed
/// path it finds becomes the incumbent.
pub trait BaselineProvider<T>
where
    T: SolverFloat,
{
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Produces a baseline tour for the given scenario.
    fn baseline(&self, model: &Model<T>) -> Option<Tour<T>>;
}

impl<T> std::fmt::Debug for dyn BaselineProvider<T> + '_
where
    T: SolverFloat,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BaselineProvider({})", self.name())
    }
}

/// A `BaselineProvider` that hands out a fixed, precomputed tour.
#[derive(Debug, Clone)]
pub struct SeedTour<T> {
    tour: Tour<T>,
}

impl<T> SeedTour<T> {
    /// Wraps a precomputed tour.
    #[inline]
    pub fn new(tour: Tour<T>) -> Self {
        Self { tour }
    }
}

impl<T> BaselineProvider<T> for SeedTour<T>
where
    T: SolverFloat,
{
    fn name(&self) -> &str {
        "SeedTour"
    }

    fn baseline(&self, _model: &Model<T>) -> Option<Tour<T>> {
        Some(self.tour.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_model::{index::CityIndex, model::ModelBuilder};

    #[test]
    fn test_seed_tour_hands_out_its_tour() {
        let model = ModelBuilder::<f64>::new(3).build_with(|_, _| 1.0).unwrap();
        let tour = Tour::from_order(
            &model,
            vec![CityIndex::new(0), CityIndex::new(1), CityIndex::new(2)],
        );
        let provider = SeedTour::new(tour.clone());
        assert_eq!(provider.name(), "SeedTour");
        assert_eq!(provider.baseline(&model), Some(tour));
    }
}
