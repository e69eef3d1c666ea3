//! Limiter Statistics Module

use serde::Serialize;

// == Limiter Stats ==
/// Admission counters for a [`super::WindowLimiter`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LimiterStats {
    /// Events admitted by `record`
    pub admitted: u64,
    /// Events rejected by `record`
    pub rejected: u64,
    /// Identities with at least one timestamp still held
    pub tracked_identities: usize,
}

impl LimiterStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of `record` calls that were rejected, 0.0 when none were made.
    pub fn rejection_rate(&self) -> f64 {
        let total = self.admitted + self.rejected;
        if total == 0 {
            0.0
        } else {
            self.rejected as f64 / total as f64
        }
    }

    pub fn record_admitted(&mut self) {
        self.admitted += 1;
    }

    pub fn record_rejected(&mut self) {
        self.rejected += 1;
    }

    pub fn set_tracked_identities(&mut self, count: usize) {
        self.tracked_identities = count;
    }
}
