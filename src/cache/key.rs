//! Range Key Module
//!
//! Defines the inclusive interval used to key cached range sums.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

// == Range Key ==
/// Inclusive index interval `[left, right]` into the backing array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RangeKey {
    left: usize,
    right: usize,
}

impl RangeKey {
    // == Constructor ==
    /// Creates a new key, rejecting ranges with `left > right`.
    pub fn new(left: usize, right: usize) -> Result<Self> {
        if left > right {
            return Err(Error::InvalidRange { left, right });
        }
        Ok(Self { left, right })
    }

    /// Left bound (inclusive).
    pub fn left(&self) -> usize {
        self.left
    }

    /// Right bound (inclusive).
    pub fn right(&self) -> usize {
        self.right
    }

    // == Contains ==
    /// Returns true if `index` falls inside the interval.
    ///
    /// A write to any such index makes the cached sum for this key stale.
    pub fn contains(&self, index: usize) -> bool {
        self.left <= index && index <= self.right
    }

    /// Number of array elements covered by the interval.
    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.left, self.right)
    }
}
