//! TTL Sweep Task
//!
//! Background task that periodically removes expired entries from an
//! [`EntryMap`] without waiting for them to be read.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::EntryMap;
use crate::error::{CacheError, Result};

// == Sweep Handle ==
/// Owner of a running sweep task.
///
/// The task stops when [`stop`](SweepHandle::stop) is called or when the
/// handle is dropped, releasing its reference to the entry map.
#[derive(Debug)]
pub struct SweepHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl SweepHandle {
    /// Signals the sweep task to stop. Calling it more than once is harmless.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Returns true while the sweep task has not exited.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        if !self.cancel.is_cancelled() {
            debug!("Sweep handle dropped while running; cancelling");
            self.cancel.cancel();
        }
    }
}

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// Each run collects expired keys under the shared lock, then deletes the
/// ones still expired under the exclusive lock.
///
/// # Arguments
/// * `entries` - Shared entry map to sweep
/// * `interval` - Delay between sweeps
///
/// # Errors
/// Returns [`CacheError::NoRuntime`] when called outside a tokio runtime.
///
/// # Example
/// ```ignore
/// let entries = Arc::new(EntryMap::<String>::new());
/// let sweeper = spawn_sweep_task(entries.clone(), Duration::from_secs(1))?;
/// // Later, during shutdown:
/// sweeper.stop();
/// ```
pub fn spawn_sweep_task<V>(entries: Arc<EntryMap<V>>, interval: Duration) -> Result<SweepHandle>
where
    V: Send + Sync + 'static,
{
    let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
    let cancel = CancellationToken::new();
    let task = runtime.spawn(sweep_loop(entries, interval, cancel.clone()));

    Ok(SweepHandle { cancel, task })
}

async fn sweep_loop<V>(entries: Arc<EntryMap<V>>, interval: Duration, cancel: CancellationToken) {
    info!(interval = ?interval, "Starting TTL sweep task");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Sweep loop cancelled");
                break;
            }
            _ = tokio::time::sleep(interval) => {
                let removed = entries.sweep_expired();
                if removed > 0 {
                    info!(removed, "TTL sweep: removed expired entries");
                } else {
                    debug!("TTL sweep: no expired entries found");
                }
            }
        }
    }
}
