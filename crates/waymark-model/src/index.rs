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

//! # City Indices (Zero-Cost)
//!
//! A transparent wrapper around `usize` identifying a city within a
//! scenario. Cities are compared by index only; the model attaches no other
//! identity to them. Keeping the wrapper `#[repr(transparent)]` makes it a
//! plain machine word at runtime while preventing accidental mixing with
//! unrelated `usize` values (positions within a path, sequence numbers,
//! matrix offsets) at compile time.

/// A strongly typed index identifying a city within a scenario.
///
/// # Examples
///
/// ```rust
/// # use waymark_model::index::CityIndex;
///
/// let city = CityIndex::new(3);
/// assert_eq!(city.get(), 3);
/// assert_eq!(format!("{}", city), "CityIndex(3)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityIndex(usize);

impl CityIndex {
    /// Creates a new `CityIndex` from a raw `usize`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for CityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CityIndex({})", self.0)
    }
}

impl std::fmt::Display for CityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CityIndex({})", self.0)
    }
}

impl From<usize> for CityIndex {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<CityIndex> for usize {
    fn from(index: CityIndex) -> Self {
        index.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_get() {
        let idx = CityIndex::new(10);
        assert_eq!(idx.get(), 10);
    }

    #[test]
    fn test_conversions() {
        let idx: CityIndex = 42.into();
        assert_eq!(idx.get(), 42);

        let raw: usize = idx.into();
        assert_eq!(raw, 42);
    }

    #[test]
    fn test_debug_and_display() {
        let idx = CityIndex::new(7);
        assert_eq!(format!("{}", idx), "CityIndex(7)");
        assert_eq!(format!("{:?}", idx), "CityIndex(7)");
    }

    #[test]
    fn test_ordering_is_by_index() {
        assert!(CityIndex::new(1) < CityIndex::new(2));
        assert_eq!(CityIndex::new(5), CityIndex::new(5));
    }
}
