//! Background Tasks Module
//!
//! Opt-in background tasks callers can run next to the limiter.
//!
//! # Tasks
//! - Identity sweep: reclaims limiter identities whose windows have expired

mod sweep;

pub use sweep::spawn_sweep_task;
