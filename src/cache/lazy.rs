//! Lazy TTL Cache Module
//!
//! Cache whose entries expire only when they are read.

use std::time::Duration;

use crate::cache::{CacheEntry, EntryMap};

// == Lazy TTL Cache ==
/// Thread-safe cache with per-entry TTL and no background activity.
///
/// Expiration is checked on [`get`](LazyTtlCache::get): a stale entry is
/// reported as absent and evicted at that moment. Stale entries that are
/// never read again stay in memory until deleted or cleared.
#[derive(Debug)]
pub struct LazyTtlCache<V> {
    entries: EntryMap<V>,
}

impl<V> LazyTtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: EntryMap::new(),
        }
    }

    // == Set ==
    /// Stores a value that expires `ttl` from now.
    ///
    /// Every TTL is taken literally: `Duration::ZERO` stores an entry that is
    /// already expired on the next read. Overwriting a key resets its TTL.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Time-to-live measured from now
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.entries.insert(key.into(), CacheEntry::new(value, Some(ttl)));
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

    /// Returns the number of physically stored entries, including stale
    /// entries that have not been read since they expired.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for LazyTtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> LazyTtlCache<V> {
    // == Get ==
    /// Returns a clone of the value if present and not expired.
    ///
    /// # Arguments
    /// * `key` - The key to retrieve
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key)
    }
}
