//! Cached Range Sum Module
//!
//! Owns an integer array together with a [`RangeCache`] and exposes the
//! composed read path (lookup, compute on miss, store) and write path
//! (mutate, then invalidate).

use crate::cache::{RangeCache, RangeKey};
use crate::error::{Error, Result};

// == Baseline ==
/// Sums `values[left..=right]` directly, without any caching.
pub fn range_sum(values: &[i64], left: usize, right: usize) -> Result<i64> {
    let key = checked_key(values.len(), left, right)?;
    Ok(sum_slice(values, key))
}

fn checked_key(len: usize, left: usize, right: usize) -> Result<RangeKey> {
    let key = RangeKey::new(left, right)?;
    if key.right() >= len {
        return Err(Error::IndexOutOfBounds {
            index: key.right(),
            len,
        });
    }
    Ok(key)
}

fn sum_slice(values: &[i64], key: RangeKey) -> i64 {
    values[key.left()..=key.right()].iter().sum()
}

// == Cached Range Sum ==
/// Array with an LRU cache of range sums in front of it.
///
/// Every operation takes `&mut self`, so a write and its invalidation can
/// never interleave with a read.
#[derive(Debug)]
pub struct CachedRangeSum {
    values: Vec<i64>,
    cache: RangeCache,
}

impl CachedRangeSum {
    // == Constructor ==
    /// Wraps `values` with a cache of `capacity` range sums.
    pub fn new(values: Vec<i64>, capacity: usize) -> Result<Self> {
        Ok(Self {
            values,
            cache: RangeCache::new(capacity)?,
        })
    }

    // == Range Sum ==
    /// Returns the sum of `values[left..=right]`, served from the cache
    /// when possible.
    pub fn range_sum(&mut self, left: usize, right: usize) -> Result<i64> {
        let key = checked_key(self.values.len(), left, right)?;
        if let Some(sum) = self.cache.get(&key) {
            return Ok(sum);
        }

        let sum = sum_slice(&self.values, key);
        self.cache.put(key, sum);
        Ok(sum)
    }

    // == Update ==
    /// Writes `value` at `index` and drops every cached range covering it.
    pub fn update(&mut self, index: usize, value: i64) -> Result<()> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = value;
        self.cache.invalidate_overlapping(index);
        Ok(())
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn cache(&self) -> &RangeCache {
        &self.cache
    }
}
