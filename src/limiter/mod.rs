//! Limiter Module
//!
//! Provides a per-identity sliding-window rate limiter.

mod clock;
mod stats;
mod window;


pub use clock::{Clock, ManualClock, SystemClock};
pub use stats::LimiterStats;
pub use window::WindowLimiter;
