//! GC TTL Cache Module
//!
//! Cache with lazy expiry on read plus a periodic background sweep.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::{CacheEntry, EntryMap};
use crate::config::Config;
use crate::error::Result;
use crate::tasks::{spawn_sweep_task, SweepHandle};

// == GC TTL Cache ==
/// Thread-safe TTL cache whose expired entries are also removed by a
/// background sweep task.
///
/// The sweep runs on the tokio runtime the cache was created in and is
/// cancelled when the cache is dropped.
#[derive(Debug)]
pub struct GcTtlCache<V> {
    /// Entry storage, shared with the sweep task
    entries: Arc<EntryMap<V>>,
    /// TTL substituted when `set` is called with a zero TTL
    default_expiration: Duration,
    /// Delay between sweeps, zero when no sweeper runs
    gc_interval: Duration,
    /// Running sweep task, if any
    sweeper: Option<SweepHandle>,
}

impl<V> GcTtlCache<V>
where
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache and, when `gc_interval` is non-zero, starts the
    /// background sweep.
    ///
    /// # Arguments
    /// * `default_expiration` - TTL used for `set` calls with a zero TTL;
    ///   zero here means such entries never expire
    /// * `gc_interval` - Delay between sweeps; zero disables the sweeper
    ///
    /// # Errors
    /// Returns [`CacheError::NoRuntime`](crate::error::CacheError::NoRuntime)
    /// if a sweeper is requested outside a tokio runtime.
    pub fn new(default_expiration: Duration, gc_interval: Duration) -> Result<Self> {
        let entries = Arc::new(EntryMap::new());
        let sweeper = if gc_interval.is_zero() {
            None
        } else {
            Some(spawn_sweep_task(Arc::clone(&entries), gc_interval)?)
        };

        debug!(
            default_expiration = ?default_expiration,
            gc_interval = ?gc_interval,
            "GC TTL cache created"
        );

        Ok(Self {
            entries,
            default_expiration,
            gc_interval,
            sweeper,
        })
    }

    /// Creates a cache from the `default_ttl` and `gc_interval` settings.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.default_ttl, config.gc_interval)
    }
}

impl<V> GcTtlCache<V> {
    // == Set ==
    /// Stores a value with the given TTL.
    ///
    /// A zero `ttl` is replaced by the cache's default expiration. If the
    /// resulting TTL is still zero the entry never expires.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Time-to-live, or zero for the default
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let ttl = if ttl.is_zero() {
            self.default_expiration
        } else {
            ttl
        };
        let ttl = (!ttl.is_zero()).then_some(ttl);

        self.entries.insert(key.into(), CacheEntry::new(value, ttl));
    }

    // == Delete ==
    /// Removes a key. Missing keys are ignored.
    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

    // == Clear ==
    /// Removes every entry at once.
    pub fn clear(&self) {
        self.entries.clear();
    }

    // == Sweep ==
    /// Runs one sweep pass immediately and returns how many entries it removed.
    ///
    /// Keys collected as expired but overwritten before the deletion phase
    /// are kept.
    pub fn sweep_expired(&self) -> usize {
        self.entries.sweep_expired()
    }

    /// Stops the background sweep. Expiry still happens lazily on read.
    pub fn stop_sweeper(&self) {
        if let Some(sweeper) = &self.sweeper {
            sweeper.stop();
        }
    }

    /// Returns true while a background sweep task is alive.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper.as_ref().is_some_and(SweepHandle::is_running)
    }

    /// Returns the TTL substituted for zero-TTL `set` calls.
    pub fn default_expiration(&self) -> Duration {
        self.default_expiration
    }

    /// Returns the configured sweep interval.
    pub fn gc_interval(&self) -> Duration {
        self.gc_interval
    }

    /// Returns the number of physically stored entries, including stale
    /// entries not yet swept or read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> GcTtlCache<V> {
    // == Get ==
    /// Returns a clone of the value if present and not expired.
    ///
    /// An expired entry found here is evicted without waiting for the sweep.
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key)
    }
}
