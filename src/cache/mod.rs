//! Cache Module
//!
//! Provides a bounded LRU cache of range sums with write-triggered
//! invalidation.

mod cached_array;
mod key;
pub mod lru;
mod stats;
mod store;


// Re-export public types
pub use cached_array::{range_sum, CachedRangeSum};
pub use key::RangeKey;
pub use lru::LruList;
pub use stats::CacheStats;
pub use store::RangeCache;
