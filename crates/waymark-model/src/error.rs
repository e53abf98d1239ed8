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

use crate::index::CityIndex;
use thiserror::Error;

/// Errors raised while constructing or validating a scenario model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A scenario must contain at least one city.
    #[error("a scenario must contain at least one city")]
    EmptyScenario,

    /// The cost function produced a negative value for an ordered pair.
    /// Costs must be nonnegative reals or positive infinity.
    #[error("negative cost for edge {from} -> {to}")]
    NegativeCost { from: CityIndex, to: CityIndex },

    /// The cost function produced a NaN for an ordered pair. NaN is not a
    /// valid cost and would poison every comparison downstream.
    #[error("NaN cost for edge {from} -> {to}")]
    NanCost { from: CityIndex, to: CityIndex },

    /// A raw cost table did not have N * N entries.
    #[error("cost table has {len} entries, expected {expected} for {num_cities} cities")]
    MalformedTable {
        len: usize,
        expected: usize,
        num_cities: usize,
    },
}
