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

use crate::{index::CityIndex, model::Model};
use num_traits::Float;

/// An ordered sequence of cities scored as a closed tour.
///
/// The cost is the sum of the costs of all consecutive edges plus the
/// closing edge from the last city back to the first. If any of those
/// edges is infeasible the whole tour cost is `T::infinity()`; an
/// infeasible tour is never installed as an incumbent.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour<T> {
    order: Vec<CityIndex>,
    cost: T,
}

impl<T> Tour<T>
where
    T: Float,
{
    /// Scores `order` as a closed tour over `model`.
    ///
    /// # Panics
    ///
    /// Panics if `order` is empty. In debug builds, panics if `order` is
    /// not a permutation of the model's cities.
    pub fn from_order(model: &Model<T>, order: Vec<CityIndex>) -> Self {
        assert!(
            !order.is_empty(),
            "called `Tour::from_order` with an empty city order"
        );
        debug_assert!(
            is_permutation(&order, model.num_cities()),
            "called `Tour::from_order` with an order that is not a permutation of 0..{}",
            model.num_cities()
        );

        let mut cost = T::zero();
        for pair in order.windows(2) {
            cost = cost + model.cost(pair[0], pair[1]);
        }
        cost = cost + model.cost(order[order.len() - 1], order[0]);

        Self { order, cost }
    }

    /// Returns the visit order of the tour.
    #[inline]
    pub fn order(&self) -> &[CityIndex] {
        &self.order
    }

    /// Returns the closed-tour cost.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the number of cities visited by the tour.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.order.len()
    }

    /// Returns true if every edge of the tour carries a finite cost.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.cost.is_finite()
    }
}

fn is_permutation(order: &[CityIndex], num_cities: usize) -> bool {
    if order.len() != num_cities {
        return false;
    }
    let mut seen = vec![false; num_cities];
    for city in order {
        if city.get() >= num_cities || seen[city.get()] {
            return false;
        }
        seen[city.get()] = true;
    }
    true
}

impl<T> std::fmt::Display for Tour<T>
where
    T: Float + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tour(cost: {}, order: [", self.cost)?;
        for (i, city) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", city.get())?;
        }
        write!(f, "])")
    }
}
