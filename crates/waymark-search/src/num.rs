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

//! # Solver Numeric Trait
//!
//! Unified numeric bounds for the Waymark solver engines. Tour costs are
//! nonnegative reals, and the infeasible-edge sentinel is `T::infinity()`.
//! IEEE float semantics give the sentinel exactly the saturating behavior
//! the bounding arithmetic requires: subtracting any finite reduction from
//! an infinite entry leaves it infinite, adding anything to it leaves it
//! infinite, and every finite candidate wins a comparison against it. No
//! representable-maximum sentinel (with its overflow hazards) is needed.
//!
//! ## Highlights
//!
//! - Requires `Float + FromPrimitive` for numeric fundamentals.
//! - `Debug + Display` for diagnostics and monitor output.
//! - `Send + Sync` so models and outcomes can cross thread boundaries even
//!   though the engines themselves are single-threaded.

use num_traits::{Float, FromPrimitive};

/// A trait alias for numeric types that can be used in the solver engines.
/// These are usually the floating point types `f32` and `f64`.
pub trait SolverFloat:
    Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

impl<T> SolverFloat for T where
    T: Float + FromPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_solver_float<T: SolverFloat>() {}

    #[test]
    fn test_float_types_satisfy_the_alias() {
        assert_solver_float::<f32>();
        assert_solver_float::<f64>();
    }

    #[test]
    fn test_infinity_saturates_under_subtraction() {
        let inf = f64::infinity();
        assert!((inf - 1.0e300).is_infinite());
        assert!((inf + 1.0).is_infinite());
        assert!(1.0e300 < inf);
    }
}
