//! Integration Tests for the Range Cache
//!
//! Exercises the cache and the composed array paths through the public API.

use range_gate::cache::{range_sum, CacheStats};
use range_gate::{CachedRangeSum, Error, RangeCache, RangeKey};

// == Helper Functions ==

fn key(left: usize, right: usize) -> RangeKey {
    RangeKey::new(left, right).unwrap()
}

// == Eviction ==

#[test]
fn test_recency_decides_eviction() {
    let mut cache = RangeCache::new(2).unwrap();
    let (a, b, c) = (key(0, 1), key(1, 2), key(2, 3));

    cache.put(a, 1);
    cache.put(b, 2);
    cache.put(a, 1);
    cache.put(c, 3);

    assert_eq!(cache.get(&a), Some(1));
    assert_eq!(cache.get(&b), None);
    assert_eq!(cache.get(&c), Some(3));
}

#[test]
fn test_distinct_inserts_keep_most_recent() {
    let capacity = 4;
    let mut cache = RangeCache::new(capacity).unwrap();

    for i in 0..10 {
        cache.put(key(i, i + 1), i as i64);
        assert!(cache.len() <= capacity);
    }

    assert_eq!(
        cache.snapshot(),
        vec![key(6, 7), key(7, 8), key(8, 9), key(9, 10)]
    );
    assert_eq!(cache.stats().evictions, 6);
}

#[test]
fn test_zero_capacity_is_rejected() {
    assert_eq!(RangeCache::new(0).unwrap_err(), Error::InvalidCapacity);
}

// == Invalidation ==

#[test]
fn test_invalidation_precision() {
    let mut cache = RangeCache::new(8).unwrap();
    cache.put(key(2, 5), 10);

    assert_eq!(cache.invalidate_overlapping(6), 0);
    assert_eq!(cache.get(&key(2, 5)), Some(10));

    assert_eq!(cache.invalidate_overlapping(4), 1);
    assert_eq!(cache.get(&key(2, 5)), None);
}

#[test]
fn test_invalidating_uncovered_index_is_noop() {
    let mut cache = RangeCache::new(8).unwrap();
    cache.put(key(0, 3), 1);
    cache.put(key(10, 12), 2);
    let before = cache.snapshot();

    assert_eq!(cache.invalidate_overlapping(7), 0);

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.snapshot(), before);
}

// == Composed Paths ==

#[test]
fn test_cached_array_tracks_writes() {
    let values: Vec<i64> = (1..=10).collect();
    let mut array = CachedRangeSum::new(values.clone(), 4).unwrap();

    assert_eq!(array.range_sum(0, 9).unwrap(), 55);
    assert_eq!(array.range_sum(5, 9).unwrap(), 40);

    array.update(7, 0).unwrap();

    assert_eq!(array.range_sum(0, 9).unwrap(), 47);
    assert_eq!(array.range_sum(5, 9).unwrap(), 32);
    assert_eq!(array.range_sum(0, 4).unwrap(), 15);
    assert_eq!(
        array.range_sum(0, 9).unwrap(),
        range_sum(array.values(), 0, 9).unwrap()
    );
}

#[test]
fn test_cached_array_stats() {
    let mut array = CachedRangeSum::new(vec![5; 20], 2).unwrap();

    array.range_sum(0, 4).unwrap(); // miss
    array.range_sum(0, 4).unwrap(); // hit
    array.range_sum(5, 9).unwrap(); // miss
    array.range_sum(10, 14).unwrap(); // miss, evicts [0, 4]
    array.update(12, 1).unwrap(); // invalidates [10, 14]

    let stats: CacheStats = array.cache().stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.invalidations, 1);
    assert_eq!(stats.total_entries, 1);
}

#[test]
fn test_cached_array_errors() {
    let mut array = CachedRangeSum::new(vec![1, 2, 3], 2).unwrap();

    assert_eq!(
        array.range_sum(2, 1),
        Err(Error::InvalidRange { left: 2, right: 1 })
    );
    assert_eq!(
        array.range_sum(0, 3),
        Err(Error::IndexOutOfBounds { index: 3, len: 3 })
    );
    assert_eq!(
        array.update(3, 9),
        Err(Error::IndexOutOfBounds { index: 3, len: 3 })
    );
}
