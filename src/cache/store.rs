//! Range Cache Module
//!
//! Main cache engine combining HashMap storage with LRU ordering and
//! write-triggered invalidation.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::lru::NodeHandle;
use crate::cache::{CacheStats, LruList, RangeKey};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy)]
struct Slot {
    value: i64,
    handle: NodeHandle,
}

// == Range Cache ==
/// Capacity-bounded cache of range sums with LRU eviction.
///
/// Holds at most `capacity` entries. A key present in the cache is only
/// correct if every write to an index it covers was followed by
/// [`RangeCache::invalidate_overlapping`]; [`super::CachedRangeSum`] wires
/// that ordering up for callers that own the array.
#[derive(Debug)]
pub struct RangeCache {
    /// Key to value + recency handle
    entries: HashMap<RangeKey, Slot>,
    /// Recency order, oldest first
    lru: LruList<RangeKey>,
    stats: CacheStats,
    capacity: usize,
}

impl RangeCache {
    // == Constructor ==
    /// Creates a new cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            lru: LruList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Get ==
    /// Looks up a cached sum.
    ///
    /// A hit marks the key most recently used. A miss leaves contents and
    /// ordering untouched.
    pub fn get(&mut self, key: &RangeKey) -> Option<i64> {
        match self.entries.get(key) {
            Some(slot) => {
                let Slot { value, handle } = *slot;
                self.lru.touch(handle);
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Returns a cached sum without bumping its recency or counting a lookup.
    pub fn peek(&self, key: &RangeKey) -> Option<i64> {
        self.entries.get(key).map(|slot| slot.value)
    }

    pub fn contains(&self, key: &RangeKey) -> bool {
        self.entries.contains_key(key)
    }

    // == Put ==
    /// Stores a sum for `key` and marks it most recently used.
    ///
    /// Overwriting an existing key keeps the size unchanged. Inserting a new
    /// key into a full cache evicts exactly one entry, the least recently
    /// used one.
    pub fn put(&mut self, key: RangeKey, value: i64) {
        if let Some(slot) = self.entries.get_mut(&key) {
            slot.value = value;
            let handle = slot.handle;
            self.lru.touch(handle);
            return;
        }

        let handle = self.lru.push_newest(key);
        self.entries.insert(key, Slot { value, handle });

        // The new key is newest, so with capacity >= 1 it is never the victim
        if self.entries.len() > self.capacity {
            if let Some(evicted) = self.lru.pop_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!(key = %evicted, "evicted least recently used range");
            }
        }
    }

    // == Invalidate ==
    /// Removes every entry whose interval contains `index`.
    ///
    /// Call after writing `index` in the backing array and before the next
    /// lookup. Cost is linear in the number of cached entries. Returns the
    /// number of removed entries; an index no entry covers is a no-op.
    pub fn invalidate_overlapping(&mut self, index: usize) -> usize {
        let stale: Vec<RangeKey> = self
            .lru
            .iter()
            .filter(|key| key.contains(index))
            .copied()
            .collect();

        for key in &stale {
            self.remove_entry(key);
        }

        if !stale.is_empty() {
            self.stats.record_invalidations(stale.len());
            debug!(index, removed = stale.len(), "invalidated overlapping ranges");
        }
        stale.len()
    }

    // == Remove ==
    /// Removes a single entry, returning its value if it was cached.
    pub fn remove(&mut self, key: &RangeKey) -> Option<i64> {
        self.remove_entry(key)
    }

    fn remove_entry(&mut self, key: &RangeKey) -> Option<i64> {
        let slot = self.entries.remove(key)?;
        self.lru.remove(slot.handle);
        Some(slot.value)
    }

    // == Snapshot ==
    /// Returns cached keys from least to most recently used.
    ///
    /// Diagnostic only; does not change recency.
    pub fn snapshot(&self) -> Vec<RangeKey> {
        self.lru.iter().copied().collect()
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
