//! Refreshing Value Task
//!
//! Single-value cache recomputed on a fixed cadence by a background task.
//! Readers never wait for a computation; they see the last finished result.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{CacheError, Result};

type Compute<T> = Arc<dyn Fn() -> T + Send + Sync>;

// == Refreshing Value ==
/// A value that a background task keeps recomputing.
pub struct RefreshingValue<T> {
    value: Arc<RwLock<T>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl<T> RefreshingValue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Computes the initial value, then spawns a task that recomputes it
    /// every `refresh_interval`.
    ///
    /// `compute` may block; it always runs on tokio's blocking pool and never
    /// while the value lock is held.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidConfig`] for a zero `refresh_interval`, and
    /// [`CacheError::Compute`] if the initial computation panics.
    pub async fn spawn<F>(compute: F, refresh_interval: Duration) -> Result<Self>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        if refresh_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "refresh interval must be non-zero".to_string(),
            ));
        }

        let compute: Compute<T> = Arc::new(compute);
        let initial = run_compute(Arc::clone(&compute)).await?;

        let value = Arc::new(RwLock::new(initial));
        let cancel = CancellationToken::new();
        let task = tokio::spawn(refresh_loop(
            compute,
            Arc::clone(&value),
            refresh_interval,
            cancel.clone(),
        ));

        Ok(Self {
            value,
            cancel,
            task,
        })
    }

    /// Returns a clone of the most recently computed value.
    pub fn get(&self) -> T {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T> RefreshingValue<T> {
    /// Stops the refresh task. The last value stays readable.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Returns true while the refresh task has not exited.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl<T> Drop for RefreshingValue<T> {
    fn drop(&mut self) {
        if !self.cancel.is_cancelled() {
            debug!("Refreshing value dropped while running; cancelling");
            self.cancel.cancel();
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RefreshingValue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshingValue")
            .field("value", &self.value)
            .field("running", &!self.task.is_finished())
            .finish()
    }
}

async fn run_compute<T>(compute: Compute<T>) -> Result<T>
where
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || compute())
        .await
        .map_err(|e| CacheError::Compute(e.to_string()))
}

async fn refresh_loop<T>(
    compute: Compute<T>,
    value: Arc<RwLock<T>>,
    refresh_interval: Duration,
    cancel: CancellationToken,
) where
    T: Send + Sync + 'static,
{
    info!(
        interval = ?refresh_interval,
        "Starting value refresh task"
    );

    // The initial value is already computed, so the first tick is one
    // interval out. Slow computations delay later ticks instead of bursting.
    let mut ticker = interval_at(Instant::now() + refresh_interval, refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Refresh loop cancelled");
                break;
            }
            _ = ticker.tick() => {
                match run_compute(Arc::clone(&compute)).await {
                    Ok(next) => {
                        *value.write().unwrap_or_else(PoisonError::into_inner) = next;
                        debug!("Refreshed cached value");
                    }
                    Err(e) => {
                        warn!(error = %e, "Value refresh failed; keeping previous value");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counter() -> (Arc<AtomicU32>, impl Fn() -> u32 + Send + Sync + 'static) {
        let calls = Arc::new(AtomicU32::new(0));
        let handle = Arc::clone(&calls);
        (calls, move || handle.fetch_add(1, Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_initial_value_is_available_immediately() {
        let refreshing = RefreshingValue::spawn(|| 42u32, Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(refreshing.get(), 42);
        assert!(refreshing.is_running());
    }

    #[tokio::test]
    async fn test_value_is_recomputed_periodically() {
        let (calls, compute) = counter();
        let refreshing = RefreshingValue::spawn(compute, Duration::from_millis(20))
            .await
            .unwrap();
        assert_eq!(refreshing.get(), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(refreshing.get() >= 1, "value should have been refreshed");
        assert!(calls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_stop_freezes_value() {
        let (_calls, compute) = counter();
        let refreshing = RefreshingValue::spawn(compute, Duration::from_millis(10))
            .await
            .unwrap();

        refreshing.stop();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!refreshing.is_running());

        let frozen = refreshing.get();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(refreshing.get(), frozen);
    }

    #[tokio::test]
    async fn test_dropping_stops_refresh_task() {
        let (calls, compute) = counter();
        let refreshing = RefreshingValue::spawn(compute, Duration::from_millis(10))
            .await
            .unwrap();
        drop(refreshing);

        tokio::time::sleep(Duration::from_millis(30)).await;
        let after_drop = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_drop);
    }

    #[tokio::test]
    async fn test_zero_refresh_interval_is_rejected() {
        let (calls, compute) = counter();
        let result = RefreshingValue::spawn(compute, Duration::ZERO).await;

        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0, "nothing should be computed");
    }

    #[tokio::test]
    async fn test_panicking_initial_compute_is_an_error() {
        let result = RefreshingValue::<u32>::spawn(|| panic!("boom"), Duration::from_secs(1)).await;
        assert!(matches!(result, Err(CacheError::Compute(_))));
    }
}
