//! Window Limiter Module
//!
//! Per-identity sliding-window-log rate limiter.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Error, Result};
use crate::limiter::{Clock, LimiterStats, SystemClock};

// == Window Limiter ==
/// Admits at most `max_requests` events per identity within any trailing
/// `window_size`.
///
/// Each identity keeps the timestamps of its own admitted events that are
/// still inside the window, oldest first. Expired timestamps are pruned
/// lazily whenever an operation touches the identity, and an identity whose
/// log becomes empty is dropped from the map, so inactive identities hold
/// no memory. Unknown identities are always admissible.
///
/// Every operation reads the clock once and uses that reading throughout.
/// The `*_at` variants take the reading from the caller instead.
#[derive(Debug)]
pub struct WindowLimiter<C: Clock = SystemClock> {
    /// Identity to admitted timestamps, ascending
    history: HashMap<String, VecDeque<Instant>>,
    window_size: Duration,
    max_requests: usize,
    clock: C,
    stats: LimiterStats,
}

impl WindowLimiter<SystemClock> {
    // == Constructor ==
    /// Creates a limiter driven by the system clock.
    ///
    /// # Errors
    /// Returns [`Error::InvalidWindowSize`] for a zero window and
    /// [`Error::InvalidMaxRequests`] for a zero limit.
    pub fn new(window_size: Duration, max_requests: usize) -> Result<Self> {
        Self::with_clock(window_size, max_requests, SystemClock)
    }
}

impl<C: Clock> WindowLimiter<C> {
    /// Creates a limiter reading time from `clock`.
    pub fn with_clock(window_size: Duration, max_requests: usize, clock: C) -> Result<Self> {
        if window_size.is_zero() {
            return Err(Error::InvalidWindowSize);
        }
        if max_requests == 0 {
            return Err(Error::InvalidMaxRequests);
        }

        Ok(Self {
            history: HashMap::new(),
            window_size,
            max_requests,
            clock,
            stats: LimiterStats::new(),
        })
    }

    // == Can Send ==
    /// Returns true if `id` could send an event now. Records nothing.
    pub fn can_send(&mut self, id: &str) -> bool {
        let now = self.clock.now();
        self.can_send_at(id, now)
    }

    pub fn can_send_at(&mut self, id: &str, now: Instant) -> bool {
        self.prune(id, now);
        self.history
            .get(id)
            .map_or(true, |log| log.len() < self.max_requests)
    }

    // == Record ==
    /// Admits and records an event for `id` if the window has room.
    ///
    /// A rejected attempt leaves no trace: it is not stored, does not count
    /// toward later decisions and does not extend the window.
    pub fn record(&mut self, id: &str) -> bool {
        let now = self.clock.now();
        self.record_at(id, now)
    }

    pub fn record_at(&mut self, id: &str, now: Instant) -> bool {
        if !self.can_send_at(id, now) {
            self.stats.record_rejected();
            return false;
        }

        match self.history.get_mut(id) {
            Some(log) => log.push_back(now),
            None => {
                let mut log = VecDeque::with_capacity(self.max_requests);
                log.push_back(now);
                self.history.insert(id.to_owned(), log);
            }
        }
        self.stats.record_admitted();
        true
    }

    // == Time Until Next Allowed ==
    /// Returns how long `id` must wait before an event would be admitted.
    ///
    /// Zero for unknown identities and identities under the limit; otherwise
    /// the time until the oldest counted event leaves the window.
    pub fn time_until_next_allowed(&mut self, id: &str) -> Duration {
        let now = self.clock.now();
        self.time_until_next_allowed_at(id, now)
    }

    pub fn time_until_next_allowed_at(&mut self, id: &str, now: Instant) -> Duration {
        self.prune(id, now);
        let Some(log) = self.history.get(id) else {
            return Duration::ZERO;
        };
        if log.len() < self.max_requests {
            return Duration::ZERO;
        }

        log.front()
            .and_then(|oldest| oldest.checked_add(self.window_size))
            .map_or(Duration::ZERO, |frees_at| {
                frees_at.saturating_duration_since(now)
            })
    }

    // == Sweep ==
    /// Prunes every identity and drops those left with an empty window.
    ///
    /// Returns the number of identities removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now();
        self.sweep_expired_at(now)
    }

    pub fn sweep_expired_at(&mut self, now: Instant) -> usize {
        let before = self.history.len();
        let window_size = self.window_size;
        self.history.retain(|_, log| {
            prune_log(log, now, window_size);
            !log.is_empty()
        });

        let removed = before - self.history.len();
        if removed > 0 {
            debug!(removed, remaining = self.history.len(), "swept idle identities");
        }
        removed
    }

    /// Drops expired timestamps for `id`, forgetting it once none remain.
    fn prune(&mut self, id: &str, now: Instant) {
        let Some(log) = self.history.get_mut(id) else {
            return;
        };
        prune_log(log, now, self.window_size);
        if log.is_empty() {
            self.history.remove(id);
        }
    }

    // == Introspection ==
    /// Number of identities currently holding timestamps.
    pub fn tracked_identities(&self) -> usize {
        self.history.len()
    }

    pub fn is_tracked(&self, id: &str) -> bool {
        self.history.contains_key(id)
    }

    pub fn window_size(&self) -> Duration {
        self.window_size
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn stats(&self) -> LimiterStats {
        let mut stats = self.stats.clone();
        stats.set_tracked_identities(self.history.len());
        stats
    }
}

/// Pops timestamps at or before `now - window_size` from the front.
fn prune_log(log: &mut VecDeque<Instant>, now: Instant, window_size: Duration) {
    while let Some(&oldest) = log.front() {
        if now.saturating_duration_since(oldest) >= window_size {
            log.pop_front();
        } else {
            break;
        }
    }
}
