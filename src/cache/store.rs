//! Entry Map Module
//!
//! Lock-protected key/entry storage shared by every cache variant. Reads take
//! the shared lock; inserts, removals, clears and sweeps take the exclusive one.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use crate::cache::CacheEntry;

// == Entry Map ==
/// Thread-safe map from string keys to cache entries with lazy expiry.
#[derive(Debug)]
pub struct EntryMap<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V> EntryMap<V> {
    // == Constructor ==
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    // A panicking writer cannot leave the HashMap half-updated, so a poisoned
    // lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    // == Insert ==
    /// Stores an entry, replacing any previous entry (and its TTL) for the key.
    pub fn insert(&self, key: String, entry: CacheEntry<V>) {
        self.write().insert(key, entry);
    }

    // == Remove ==
    /// Removes a key unconditionally. Returns whether it was present.
    pub fn remove(&self, key: &str) -> bool {
        self.write().remove(key).is_some()
    }

    // == Clear ==
    /// Swaps in an empty map in a single exclusive section.
    pub fn clear(&self) {
        *self.write() = HashMap::new();
    }

    // == Length ==
    /// Returns the number of physically stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    // == Is Empty ==
    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // == Evict If Expired ==
    /// Removes `key` only if the stored entry is still expired at `now`.
    ///
    /// An entry overwritten after `now` carries a later expiration and is kept.
    pub fn evict_if_expired(&self, key: &str, now: Instant) -> bool {
        let mut entries = self.write();
        let expired = entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now));
        if expired {
            entries.remove(key);
        }
        expired
    }

    // == Collect Expired ==
    /// Returns the keys of all entries with an expiration at or before `now`.
    pub fn collect_expired(&self, now: Instant) -> Vec<String> {
        self.read()
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Remove Expired ==
    /// Deletes the given keys that are still expired at `now`.
    ///
    /// Keys refreshed by a `set` since they were collected are skipped.
    /// Returns the number of entries removed.
    pub fn remove_expired(&self, keys: &[String], now: Instant) -> usize {
        let mut entries = self.write();
        let mut removed = 0;
        for key in keys {
            if entries.get(key).is_some_and(|entry| entry.is_expired_at(now)) {
                entries.remove(key);
                removed += 1;
            }
        }
        removed
    }

    // == Sweep Expired ==
    /// Runs one collect-then-delete pass over the whole map.
    ///
    /// Collection happens under the shared lock so readers are not blocked
    /// while scanning; only the deletion phase takes the exclusive lock.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let keys = self.collect_expired(now);
        if keys.is_empty() {
            return 0;
        }
        self.remove_expired(&keys, now)
    }
}

impl<V: Clone> EntryMap<V> {
    // == Get ==
    /// Returns a clone of the value if present and fresh.
    ///
    /// A stale entry is reported as absent. It is then evicted under the
    /// exclusive lock after re-checking, so a concurrent overwrite survives.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired_at(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }
        self.evict_if_expired(key, now);
        None
    }
}

impl<V> Default for EntryMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fresh(value: &str) -> CacheEntry<String> {
        CacheEntry::new(value.to_string(), Some(Duration::from_secs(60)))
    }

    fn stale(value: &str) -> CacheEntry<String> {
        CacheEntry::new(value.to_string(), Some(Duration::ZERO))
    }

    #[test]
    fn test_map_new() {
        let map: EntryMap<String> = EntryMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_map_insert_and_get() {
        let map = EntryMap::new();
        map.insert("key1".to_string(), fresh("value1"));

        assert_eq!(map.get("key1"), Some("value1".to_string()));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn test_map_get_evicts_stale_entry() {
        let map = EntryMap::new();
        map.insert("key1".to_string(), stale("value1"));
        assert_eq!(map.len(), 1);

        assert_eq!(map.get("key1"), None);
        assert_eq!(map.len(), 0, "stale entry should be removed on read");
    }

    #[test]
    fn test_evict_if_expired_keeps_refreshed_entry() {
        let map = EntryMap::new();
        let observed_at = Instant::now();
        map.insert("key1".to_string(), fresh("value2"));

        assert!(!map.evict_if_expired("key1", observed_at));
        assert_eq!(map.get("key1"), Some("value2".to_string()));
    }

    #[test]
    fn test_remove_and_clear() {
        let map = EntryMap::new();
        map.insert("a".to_string(), fresh("1"));
        map.insert("b".to_string(), fresh("2"));

        assert!(map.remove("a"));
        assert!(!map.remove("a"));
        assert_eq!(map.len(), 1);

        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn test_collect_expired_skips_persistent_entries() {
        let map = EntryMap::new();
        map.insert("forever".to_string(), CacheEntry::persistent("v".to_string()));
        map.insert("gone".to_string(), stale("v"));
        map.insert("alive".to_string(), fresh("v"));

        let keys = map.collect_expired(Instant::now());
        assert_eq!(keys, vec!["gone".to_string()]);
    }

    #[test]
    fn test_remove_expired_skips_keys_refreshed_after_collection() {
        let map = EntryMap::new();
        map.insert("a".to_string(), stale("old"));
        map.insert("b".to_string(), stale("old"));

        let now = Instant::now();
        let mut keys = map.collect_expired(now);
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);

        // "b" is overwritten between the two phases
        map.insert("b".to_string(), fresh("new"));

        assert_eq!(map.remove_expired(&keys, now), 1);
        assert_eq!(map.get("a"), None);
        assert_eq!(map.get("b"), Some("new".to_string()));
    }

    #[test]
    fn test_sweep_expired() {
        let map = EntryMap::new();
        map.insert("key1".to_string(), stale("value1"));
        map.insert("key2".to_string(), fresh("value2"));

        assert_eq!(map.sweep_expired(), 1);
        assert_eq!(map.len(), 1);
        assert_eq!(map.sweep_expired(), 0);
    }
}
