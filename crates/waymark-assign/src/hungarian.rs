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

//! Minimum-cost perfect bipartite matching.
//!
//! Successive shortest augmenting paths with row/column dual potentials
//! (the Hungarian algorithm, O(N^3)). Rows and columns are indexed
//! 1-based internally, with a virtual column 0 anchoring each
//! augmenting-path search; the final assignment cost falls out of the
//! virtual column's accumulated potential.
//!
//! Infinite entries are permitted and behave as a saturating sentinel:
//! subtracting any finite potential leaves them infinite, and they lose
//! every comparison against a finite candidate. A row for which no
//! finite column can be settled makes the instance infeasible.

use thiserror::Error;
use waymark_search::num::SolverFloat;

/// Errors produced by the assignment solver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// The cost table is not a square matrix.
    #[error("cost table of length {len} is not a square matrix of dimension {num_cities}")]
    NotSquare { len: usize, num_cities: usize },

    /// Some row cannot be matched to any column at finite cost.
    #[error("no perfect assignment with finite cost exists")]
    Infeasible,
}

/// A minimum-cost perfect assignment: a bijection over `{0..N-1}` and
/// its total cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<T> {
    matching: Vec<usize>,
    cost: T,
}

impl<T> Assignment<T>
where
    T: SolverFloat,
{
    /// The column matched to each row: `matching()[i]` is the column
    /// assigned to row `i`.
    #[inline]
    pub fn matching(&self) -> &[usize] {
        &self.matching
    }

    /// Consumes the assignment and returns the matching.
    #[inline]
    pub fn into_matching(self) -> Vec<usize> {
        self.matching
    }

    /// The total cost `sum(cost[i][matching[i]])`.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }
}

/// Computes a minimum-cost perfect assignment over the row-major
/// `num_cities` × `num_cities` cost table.
///
/// # Errors
///
/// Returns [`AssignmentError::NotSquare`] if the table length does not
/// match the dimension, and [`AssignmentError::Infeasible`] if no
/// perfect assignment with finite cost exists.
pub fn min_cost_assignment<T>(
    costs: &[T],
    num_cities: usize,
) -> Result<Assignment<T>, AssignmentError>
where
    T: SolverFloat,
{
    if costs.len() != num_cities * num_cities {
        return Err(AssignmentError::NotSquare {
            len: costs.len(),
            num_cities,
        });
    }

    let n = num_cities;

    // 1-based rows and columns; index 0 is the virtual column that
    // anchors each augmenting-path search.
    let mut u = vec![T::zero(); n + 1];
    let mut v = vec![T::zero(); n + 1];
    // p[j] = the row currently matched to column j, 0 = unmatched.
    let mut p = vec![0usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut dist = vec![T::infinity(); n + 1];
        let mut prev = vec![0usize; n + 1];
        let mut done = vec![false; n + 1];

        // Grow the alternating tree until the frontier column is
        // unmatched, then augment along it.
        while p[j0] != 0 {
            done[j0] = true;
            let i0 = p[j0];
            let mut j1 = 0usize;
            let mut delta = T::infinity();

            for j in 1..=n {
                if done[j] {
                    continue;
                }
                let cur = costs[(i0 - 1) * n + (j - 1)] - u[i0] - v[j];
                if cur < dist[j] {
                    dist[j] = cur;
                    prev[j] = j0;
                }
                if dist[j] < delta {
                    delta = dist[j];
                    j1 = j;
                }
            }

            // Every unsettled column is at infinite reduced distance:
            // row i cannot reach any remaining column at finite cost.
            if j1 == 0 {
                return Err(AssignmentError::Infeasible);
            }

            for j in 0..=n {
                if done[j] {
                    u[p[j]] = u[p[j]] + delta;
                    v[j] = v[j] - delta;
                } else {
                    dist[j] = dist[j] - delta;
                }
            }
            j0 = j1;
        }

        while j0 != 0 {
            let j1 = prev[j0];
            p[j0] = p[j1];
            j0 = j1;
        }
    }

    let mut matching = vec![0usize; n];
    for j in 1..=n {
        if p[j] != 0 {
            matching[p[j] - 1] = j - 1;
        }
    }

    Ok(Assignment {
        matching,
        cost: -v[0],
    })
}
