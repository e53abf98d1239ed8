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

use crate::{error::ModelError, index::CityIndex};
use num_traits::Float;

#[inline(always)]
fn flatten_index(num_cities: usize, from: CityIndex, to: CityIndex) -> usize {
    from.get() * num_cities + to.get()
}

/// Represents the theoretical size of the branch-and-bound search tree for
/// a tour scenario.
///
/// With the start city fixed, level $k$ of the tree holds
/// $(N-1)(N-2)\cdots(N-k)$ partial paths, and the full tree is the sum over
/// all levels. Since these numbers exceed standard integer limits quickly,
/// this struct stores the value in **Logarithmic Space** ($\log_{10}$).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Complexity {
    /// The base-10 logarithm of the total search tree size.
    log_val: f64,
}

impl Complexity {
    /// Calculates the complexity for a given number of cities.
    pub fn new(num_cities: usize) -> Self {
        if num_cities <= 1 {
            return Complexity { log_val: 0.0 }; // 1 node (root), log10(1) = 0
        }

        let n = num_cities as f64;

        // Helper to compute log10(10^a + 10^b)
        let log10_add = |a: f64, b: f64| -> f64 {
            let max = a.max(b);
            let min = a.min(b);
            max + (1.0 + 10.0_f64.powf(min - max)).log10()
        };

        // 'current_level_log' tracks log10(L_k), with L_0 = 1 (the root
        // path containing only the start city).
        let mut current_level_log = 0.0;
        let mut total_sum_log = 0.0;

        for k in 1..num_cities {
            // L_k = L_{k-1} * (N - k): the number of cities still available
            // at depth k once the start city is fixed.
            current_level_log += (n - k as f64).log10();
            total_sum_log = log10_add(total_sum_log, current_level_log);
        }

        Complexity {
            log_val: total_sum_log,
        }
    }

    /// Returns the exponent (order of magnitude).
    #[inline]
    pub fn exponent(&self) -> u64 {
        self.log_val.floor() as u64
    }

    /// Returns the mantissa (coefficient).
    #[inline]
    pub fn mantissa(&self) -> f64 {
        let fractional_part = self.log_val - self.log_val.floor();
        10.0_f64.powf(fractional_part)
    }

    /// Returns the raw log10 value.
    #[inline]
    pub fn raw(&self) -> f64 {
        self.log_val
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} × 10^{}", self.mantissa(), self.exponent())
    }
}

impl std::fmt::Debug for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Complexity(log10={:.4})", self.log_val)
    }
}

/// The immutable data model describing a tour scenario.
///
/// This struct holds the pre-validated, queryable cost table:
/// - `costs[from * num_cities + to]`: the travel cost of the ordered edge
///   `from -> to`, a nonnegative finite value or `T::infinity()` for an
///   infeasible edge. The table need not be symmetric.
/// - Every diagonal entry is `T::infinity()`; a city never travels to
///   itself.
///
/// Construction:
/// - Use `ModelBuilder` and call `ModelBuilder::build_with` to obtain a
///   validated `Model` from a cost closure, or `ModelBuilder::build_from_table`
///   from a raw row-major table.
#[derive(Clone, Debug, PartialEq)]
pub struct Model<T> {
    costs: Vec<T>, // len = num_cities * num_cities, row-major
    num_cities: usize,
}

impl<T> Model<T>
where
    T: Float,
{
    /// Returns the number of cities in the scenario.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use waymark_model::model::ModelBuilder;
    ///
    /// let model = ModelBuilder::<f64>::new(3)
    ///     .build_with(|from, to| (from.get() as f64 - to.get() as f64).abs())
    ///     .unwrap();
    /// assert_eq!(model.num_cities(), 3);
    /// ```
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Returns the cost of the ordered edge `from -> to`.
    ///
    /// Diagonal edges are always `T::infinity()`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds.
    #[inline]
    pub fn cost(&self, from: CityIndex, to: CityIndex) -> T {
        debug_assert!(
            from.get() < self.num_cities,
            "called `Model::cost` with from index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            from.get()
        );
        debug_assert!(
            to.get() < self.num_cities,
            "called `Model::cost` with to index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            to.get()
        );

        self.costs[flatten_index(self.num_cities, from, to)]
    }

    /// Returns true if the ordered edge `from -> to` carries a finite cost.
    #[inline]
    pub fn is_edge_feasible(&self, from: CityIndex, to: CityIndex) -> bool {
        self.cost(from, to).is_finite()
    }

    /// Returns the full row-major cost table.
    ///
    /// Row `i` holds the outgoing costs of city `i`.
    #[inline]
    pub fn cost_table(&self) -> &[T] {
        &self.costs
    }

    /// Returns the complexity of the scenario's search tree.
    #[inline]
    pub fn complexity(&self) -> Complexity {
        Complexity::new(self.num_cities)
    }
}

/// A builder that validates scenario data before producing a `Model`.
///
/// # Examples
///
/// ```rust
/// # use waymark_model::model::ModelBuilder;
/// # use waymark_model::index::CityIndex;
///
/// let model = ModelBuilder::<f64>::new(2)
///     .build_with(|_, _| 1.0)
///     .unwrap();
/// // The diagonal is forced infeasible regardless of the cost closure.
/// assert!(model.cost(CityIndex::new(0), CityIndex::new(0)).is_infinite());
/// assert_eq!(model.cost(CityIndex::new(0), CityIndex::new(1)), 1.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ModelBuilder<T> {
    num_cities: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> ModelBuilder<T>
where
    T: Float,
{
    /// Creates a builder for a scenario with `num_cities` cities.
    #[inline]
    pub fn new(num_cities: usize) -> Self {
        Self {
            num_cities,
            _marker: std::marker::PhantomData,
        }
    }

    /// Builds a validated `Model` by querying `cost_fn` for every ordered
    /// pair of distinct cities. The diagonal is forced to `T::infinity()`
    /// without consulting the closure.
    ///
    /// Returns an error if the scenario is empty or the closure produces a
    /// negative or NaN cost.
    pub fn build_with<F>(self, cost_fn: F) -> Result<Model<T>, ModelError>
    where
        F: Fn(CityIndex, CityIndex) -> T,
    {
        if self.num_cities == 0 {
            return Err(ModelError::EmptyScenario);
        }

        let n = self.num_cities;
        let mut costs = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let (from, to) = (CityIndex::new(i), CityIndex::new(j));
                if i == j {
                    costs.push(T::infinity());
                    continue;
                }
                let cost = cost_fn(from, to);
                if cost.is_nan() {
                    return Err(ModelError::NanCost { from, to });
                }
                if cost < T::zero() {
                    return Err(ModelError::NegativeCost { from, to });
                }
                costs.push(cost);
            }
        }

        Ok(Model {
            costs,
            num_cities: n,
        })
    }

    /// Builds a validated `Model` from a raw row-major cost table of
    /// `num_cities * num_cities` entries. The diagonal is forced to
    /// `T::infinity()`.
    pub fn build_from_table(self, table: Vec<T>) -> Result<Model<T>, ModelError> {
        let n = self.num_cities;
        if table.len() != n * n {
            return Err(ModelError::MalformedTable {
                len: table.len(),
                expected: n * n,
                num_cities: n,
            });
        }
        self.build_with(|from, to| table[flatten_index(n, from, to)])
    }
}
