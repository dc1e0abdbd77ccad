//! Simple Cache Module
//!
//! Unbounded cache without expiration.

use crate::cache::{CacheEntry, EntryMap};

// == Simple Cache ==
/// Thread-safe key/value cache whose entries live until deleted or cleared.
#[derive(Debug)]
pub struct SimpleCache<V> {
    entries: EntryMap<V>,
}

impl<V> SimpleCache<V> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: EntryMap::new(),
        }
    }

    /// Stores a value, overwriting any previous value for the key.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), CacheEntry::persistent(value));
    }

    /// Removes a key. Missing keys are ignored.
    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Removes every entry at once.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for SimpleCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> SimpleCache<V> {
    /// Returns a clone of the stored value, if any.
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key)
    }
}
