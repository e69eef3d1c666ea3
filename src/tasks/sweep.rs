//! Identity Sweep Task
//!
//! Background task that periodically drops limiter identities with fully
//! expired windows.
//!
//! Lazy pruning only reclaims an identity when it is touched again. This
//! task covers identities that never come back.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::limiter::{Clock, WindowLimiter};

/// Spawns a task that calls [`WindowLimiter::sweep_expired`] every
/// `sweep_interval_secs` seconds under the write lock.
///
/// Abort the returned handle to stop it.
///
/// # Example
/// ```ignore
/// let limiter = Arc::new(RwLock::new(WindowLimiter::new(Duration::from_secs(10), 1)?));
/// let sweep_handle = spawn_sweep_task(limiter.clone(), 1);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<C>(
    limiter: Arc<RwLock<WindowLimiter<C>>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()>
where
    C: Clock + 'static,
{
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting identity sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut guard = limiter.write().await;
                let removed = guard.sweep_expired();
                (removed, guard.tracked_identities())
            };

            if removed > 0 {
                info!(
                    "Identity sweep: reclaimed {} idle identities, {} still tracked",
                    removed, remaining
                );
            } else {
                debug!("Identity sweep: no idle identities found");
            }
        }
    })
}
