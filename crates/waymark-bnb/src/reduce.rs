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

//! Reduced cost matrix.
//!
//! The matrix is the bound primitive of the branch-and-bound search:
//! subtracting each row's and column's minimum finite entry and adding
//! those minima to a running bound yields an admissible lower bound on
//! the cost of any tour completion, while preserving the same optimal
//! solution. Every search node owns exactly one `ReducedMatrix`; matrices
//! are never shared between parent and child nodes.

use waymark_model::{index::CityIndex, model::Model};
use waymark_search::num::SolverFloat;

#[inline(always)]
fn flatten_index(num_cities: usize, row: usize, col: usize) -> usize {
    row * num_cities + col
}

/// A row-major N×N cost matrix supporting in-place row/column reduction
/// and blocking. Entries are nonnegative reals or infinity (infeasible).
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedMatrix<T> {
    entries: Vec<T>,
    num_cities: usize,
}

impl<T> ReducedMatrix<T>
where
    T: SolverFloat,
{
    /// Builds a matrix from the model's cost table. The model already
    /// forces the diagonal to infinity.
    #[inline]
    pub fn from_model(model: &Model<T>) -> Self {
        Self {
            entries: model.cost_table().to_vec(),
            num_cities: model.num_cities(),
        }
    }

    /// Builds a matrix from a raw row-major table. Used by tests.
    ///
    /// # Panics
    ///
    /// Panics if `entries.len() != num_cities * num_cities`.
    pub fn from_table(entries: Vec<T>, num_cities: usize) -> Self {
        assert_eq!(
            entries.len(),
            num_cities * num_cities,
            "called `ReducedMatrix::from_table` with malformed table: the len is {} but {} cities require {}",
            entries.len(),
            num_cities,
            num_cities * num_cities
        );
        Self {
            entries,
            num_cities,
        }
    }

    /// Returns the number of cities (the matrix dimension).
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Returns the entry for the directed edge `from -> to`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: CityIndex, to: CityIndex) -> T {
        debug_assert!(
            from.get() < self.num_cities,
            "called `ReducedMatrix::get` with row index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            from.get()
        );
        debug_assert!(
            to.get() < self.num_cities,
            "called `ReducedMatrix::get` with column index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            to.get()
        );
        self.entries[flatten_index(self.num_cities, from.get(), to.get())]
    }

    /// Sets every entry in the given row to infinity, closing off all
    /// outgoing edges from that city.
    #[inline]
    pub fn block_row(&mut self, from: CityIndex) {
        debug_assert!(
            from.get() < self.num_cities,
            "called `ReducedMatrix::block_row` with row index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            from.get()
        );
        let start = from.get() * self.num_cities;
        for entry in self.entries[start..start + self.num_cities].iter_mut() {
            *entry = T::infinity();
        }
    }

    /// Sets every entry in the given column to infinity, closing off
    /// all incoming edges to that city.
    #[inline]
    pub fn block_column(&mut self, to: CityIndex) {
        debug_assert!(
            to.get() < self.num_cities,
            "called `ReducedMatrix::block_column` with column index out of bounds: the len is {} but the index is {}",
            self.num_cities,
            to.get()
        );
        for row in 0..self.num_cities {
            self.entries[flatten_index(self.num_cities, row, to.get())] = T::infinity();
        }
    }

    /// Returns true if the given row contains at least one finite entry.
    #[inline]
    pub fn row_has_finite(&self, from: CityIndex) -> bool {
        let start = from.get() * self.num_cities;
        self.entries[start..start + self.num_cities]
            .iter()
            .any(|entry| entry.is_finite())
    }

    /// Returns true if the given column contains at least one finite entry.
    #[inline]
    pub fn column_has_finite(&self, to: CityIndex) -> bool {
        (0..self.num_cities)
            .any(|row| self.entries[flatten_index(self.num_cities, row, to.get())].is_finite())
    }

    /// Reduces the matrix in place and returns the tightened bound.
    ///
    /// Every row with at least one finite entry has its minimum finite
    /// value subtracted from the whole row and added to `base`; rows
    /// that are entirely infinite are left untouched. The same pass is
    /// then applied per column over the row-reduced matrix.
    ///
    /// Idempotent on an already-reduced matrix: every row and column
    /// minimum is then zero or infinity, so a second call changes no
    /// entry and adds nothing to the bound.
    pub fn reduce(&mut self, base: T) -> T {
        let n = self.num_cities;
        let mut bound = base;

        for row in 0..n {
            let start = row * n;
            let mut min = T::infinity();
            for entry in self.entries[start..start + n].iter() {
                if *entry < min {
                    min = *entry;
                }
            }
            if !min.is_finite() || min <= T::zero() {
                continue;
            }
            bound = bound + min;
            for entry in self.entries[start..start + n].iter_mut() {
                *entry = *entry - min;
            }
        }

        for col in 0..n {
            let mut min = T::infinity();
            for row in 0..n {
                let entry = self.entries[flatten_index(n, row, col)];
                if entry < min {
                    min = entry;
                }
            }
            if !min.is_finite() || min <= T::zero() {
                continue;
            }
            bound = bound + min;
            for row in 0..n {
                let idx = flatten_index(n, row, col);
                self.entries[idx] = self.entries[idx] - min;
            }
        }

        bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f64 = f64::INFINITY;

    fn matrix_3x3() -> ReducedMatrix<f64> {
        // Rows: 0 -> {1: 4.0, 2: 7.0}, 1 -> {0: 3.0, 2: 6.0}, 2 -> {0: 5.0, 1: 8.0}
        ReducedMatrix::from_table(
            vec![
                INF, 4.0, 7.0, //
                3.0, INF, 6.0, //
                5.0, 8.0, INF,
            ],
            3,
        )
    }

    #[test]
    fn test_reduce_accumulates_row_and_column_minima() {
        let mut matrix = matrix_3x3();
        let bound = matrix.reduce(0.0);

        // Row minima: 4 + 3 + 5 = 12. After the row pass column 2 has
        // minimum 3, contributing another 3.
        assert_eq!(bound, 15.0);

        // Every row and column now has a zero or is all-infinite.
        for row in 0..3 {
            let min = (0..3)
                .map(|col| matrix.get(CityIndex::new(row), CityIndex::new(col)))
                .fold(INF, f64::min);
            assert_eq!(min, 0.0, "row {} should contain a zero", row);
        }
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let mut matrix = matrix_3x3();
        let bound = matrix.reduce(0.0);

        let before = matrix.clone();
        let bound_again = matrix.reduce(bound);

        assert_eq!(bound_again, bound, "second reduce must add nothing");
        assert_eq!(matrix, before, "second reduce must change no entry");
    }

    #[test]
    fn test_reduce_skips_all_infinite_rows() {
        let mut matrix = ReducedMatrix::from_table(
            vec![
                INF, INF, //
                2.0, INF,
            ],
            2,
        );
        let bound = matrix.reduce(0.0);

        // Only row 1 contributes; the blocked row adds nothing and the
        // column pass finds no further finite positive minimum.
        assert_eq!(bound, 2.0);
        assert!(!matrix.row_has_finite(CityIndex::new(0)));
        assert!(matrix.row_has_finite(CityIndex::new(1)));
    }

    #[test]
    fn test_reduce_carries_base_bound() {
        let mut matrix = matrix_3x3();
        let bound = matrix.reduce(10.0);
        assert_eq!(bound, 25.0);
    }

    #[test]
    fn test_block_row_and_column() {
        let mut matrix = matrix_3x3();
        matrix.block_row(CityIndex::new(0));
        matrix.block_column(CityIndex::new(1));

        assert!(!matrix.row_has_finite(CityIndex::new(0)));
        assert!(!matrix.column_has_finite(CityIndex::new(1)));
        assert_eq!(matrix.get(CityIndex::new(1), CityIndex::new(1)), INF);
        assert_eq!(matrix.get(CityIndex::new(1), CityIndex::new(0)), 3.0);
    }

    #[test]
    #[should_panic(expected = "malformed table")]
    fn test_from_table_rejects_wrong_length() {
        let _ = ReducedMatrix::from_table(vec![1.0, 2.0, 3.0], 2);
    }
}
