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

//! # Waymark Model
//!
//! The immutable scenario model for the Waymark tour optimization toolkit.
//! A scenario is a finite set of cities together with a pairwise, possibly
//! asymmetric, travel cost function. Costs are nonnegative reals; a missing
//! edge is encoded as positive infinity, which behaves as a saturating
//! sentinel under the arithmetic the solvers perform (subtracting a finite
//! value from it, or comparing it against any finite candidate, never
//! produces a finite result).
//!
//! ## Modules
//!
//! - `index`: the strongly typed `CityIndex`.
//! - `model`: validated dense cost table (`Model`, `ModelBuilder`) and the
//!   log-space search tree size (`Complexity`).
//! - `tour`: `Tour`, an ordered city sequence scored as a closed tour.
//! - `error`: construction and validation errors.

pub mod error;
pub mod index;
pub mod model;
pub mod tour;
