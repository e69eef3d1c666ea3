//! Range Gate - Bounded in-memory admission and retention primitives
//!
//! Provides an LRU cache of range sums with write-triggered invalidation and
//! a per-identity sliding-window rate limiter.

pub mod cache;
pub mod config;
pub mod driver;
pub mod error;
pub mod limiter;
pub mod tasks;

pub use cache::{CachedRangeSum, RangeCache, RangeKey};
pub use config::Config;
pub use error::{Error, Result};
pub use limiter::{Clock, ManualClock, SystemClock, WindowLimiter};
pub use tasks::spawn_sweep_task;
