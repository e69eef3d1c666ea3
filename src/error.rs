//! Error types for range_gate
//!
//! Provides unified error handling using thiserror.
//!
//! Only contract violations live here. A cache miss, a rate-limit rejection
//! and an unknown identity are ordinary return values, not errors.

use thiserror::Error;

// == Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Cache constructed with zero capacity
    #[error("Invalid capacity: cache capacity must be positive")]
    InvalidCapacity,

    /// Limiter constructed with a zero-length window
    #[error("Invalid window size: window must be longer than zero")]
    InvalidWindowSize,

    /// Limiter constructed with zero allowed requests
    #[error("Invalid max requests: limit must be positive")]
    InvalidMaxRequests,

    /// Range whose left bound is past its right bound
    #[error("Invalid range: left {left} is greater than right {right}")]
    InvalidRange { left: usize, right: usize },

    /// Index outside the backing array
    #[error("Index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Bad configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;
