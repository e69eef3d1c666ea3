//! Rate Limiter Demonstration
//!
//! Feeds a synthetic message stream through a shared [`WindowLimiter`] and
//! records each admission decision.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::limiter::{Clock, WindowLimiter};

// == Admission Record ==
/// Outcome of one demo message.
#[derive(Debug, Clone, Serialize)]
pub struct AdmissionRecord {
    pub message_id: usize,
    pub identity: String,
    pub admitted: bool,
    /// Seconds until the identity may send again, measured after the attempt
    pub wait_secs: f64,
    /// RFC 3339 wall-clock time of the attempt
    pub at: String,
}

impl AdmissionRecord {
    /// One-line console rendering.
    pub fn render(&self) -> String {
        let verdict = if self.admitted {
            "✓".to_string()
        } else {
            format!("× (wait {:.1}s)", self.wait_secs)
        };
        format!(
            "Message {:2} | User {} | {}",
            self.message_id, self.identity, verdict
        )
    }
}

/// Identity that owns `message_id` in a stream over `identities` users.
pub fn identity_for(message_id: usize, identities: usize) -> String {
    (message_id % identities.max(1) + 1).to_string()
}

// == Runner ==
/// Sends messages `first_message_id..first_message_id + count` through the
/// limiter, pausing a random duration from `pause_ms` between messages.
///
/// The lock is held only for the record/wait pair of each message, never
/// across a pause.
pub async fn run_demo<C, R>(
    limiter: &Arc<RwLock<WindowLimiter<C>>>,
    first_message_id: usize,
    count: usize,
    identities: usize,
    pause_ms: RangeInclusive<u64>,
    rng: &mut R,
) -> Vec<AdmissionRecord>
where
    C: Clock,
    R: Rng + Send,
{
    let mut records = Vec::with_capacity(count);

    for message_id in first_message_id..first_message_id + count {
        let identity = identity_for(message_id, identities);

        let (admitted, wait) = {
            let mut guard = limiter.write().await;
            let admitted = guard.record(&identity);
            (admitted, guard.time_until_next_allowed(&identity))
        };
        debug!(message_id, identity = %identity, admitted, "demo message processed");

        records.push(AdmissionRecord {
            message_id,
            identity,
            admitted,
            wait_secs: wait.as_secs_f64(),
            at: chrono::Utc::now().to_rfc3339(),
        });

        let pause = rng.gen_range(pause_ms.clone());
        if pause > 0 {
            tokio::time::sleep(Duration::from_millis(pause)).await;
        }
    }

    records
}
