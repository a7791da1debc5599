//! Session-scoped TTL cache
//!
//! Stores serialized resource snapshots in a single map so that one `clear()`
//! invalidates every resource at once. Values are kept as JSON so the same
//! store can hold budget, pay-period, and savings data without a type
//! parameter on the cache itself.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// A single cached value with its storage timestamp.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached value, serialized to JSON
    value: serde_json::Value,
    /// When the value was stored
    stored_at: Instant,
}

/// In-memory key/value cache with per-entry expiry.
///
/// The cache is created once at startup and handed to every fetcher and
/// mutation action, so tests can construct isolated instances instead of
/// sharing process-global state. Clones share the underlying map.
///
/// Expired entries are removed lazily when read; there is no background
/// sweep. `clear()` drops everything and is the only invalidation path.
#[derive(Debug, Clone)]
pub struct DataCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    max_age: Duration,
}

impl DataCache {
    /// Creates a cache whose entries stay fresh for `max_age`.
    pub fn new(max_age: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            max_age,
        }
    }

    /// Returns the cached value for `key` if present and unexpired.
    ///
    /// Reading an expired entry removes it before returning `None`, so a
    /// subsequent read behaves exactly like a fresh miss. A value that fails
    /// to deserialize into `T` is treated as a miss and logged.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() > self.max_age {
            entries.remove(key);
            return None;
        }

        match serde_json::from_value(entry.value.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(key, error = %e, "cached value failed to deserialize");
                None
            }
        }
    }

    /// Stores `value` under `key`, overwriting any existing entry.
    ///
    /// Overwriting resets the entry's age to zero. A value that cannot be
    /// serialized is skipped (logged, not fatal) so the next read falls
    /// through to the backend.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(e) => {
                debug!(key, error = %e, "value failed to serialize, not caching");
                return;
            }
        };

        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.to_string(),
            CacheEntry {
                value: json,
                stored_at: Instant::now(),
            },
        );
    }

    /// Removes all entries.
    ///
    /// This is the sole invalidation mechanism: mutations and manual refresh
    /// clear everything rather than tracking per-resource keys. Clearing is
    /// idempotent, so overlapping clears from concurrent mutations are
    /// harmless.
    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
    }

    /// Returns the number of entries currently stored (including any that
    /// have expired but not yet been read).
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DataCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(super::DEFAULT_MAX_AGE_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::thread;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn test_data(value: i32) -> TestData {
        TestData {
            name: "test".to_string(),
            value,
        }
    }

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let cache = DataCache::new(Duration::from_secs(60));
        let result: Option<TestData> = cache.get("missing");
        assert!(result.is_none());
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let cache = DataCache::new(Duration::from_secs(60));
        cache.set("key", &test_data(42));

        let result: TestData = cache.get("key").expect("fresh entry should be present");
        assert_eq!(result, test_data(42));
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let cache = DataCache::new(Duration::from_millis(20));
        cache.set("key", &test_data(1));

        thread::sleep(Duration::from_millis(40));

        let result: Option<TestData> = cache.get("key");
        assert!(result.is_none(), "expired entry should read as a miss");
        assert!(cache.is_empty(), "expired entry should be removed by the read");

        // Re-reading after eviction behaves like a fresh miss
        let result: Option<TestData> = cache.get("key");
        assert!(result.is_none());
    }

    #[test]
    fn test_overwrite_replaces_value_and_resets_age() {
        let cache = DataCache::new(Duration::from_millis(60));
        cache.set("key", &test_data(1));

        thread::sleep(Duration::from_millis(40));
        cache.set("key", &test_data(2));
        thread::sleep(Duration::from_millis(40));

        // 80ms after the first set but only 40ms after the overwrite: the
        // entry must still be fresh and hold the second value.
        let result: TestData = cache.get("key").expect("overwritten entry should be fresh");
        assert_eq!(result, test_data(2));
    }

    #[test]
    fn test_clear_removes_all_entries() {
        let cache = DataCache::new(Duration::from_secs(60));
        cache.set("a", &test_data(1));
        cache.set("b", &test_data(2));
        assert_eq!(cache.len(), 2);

        cache.clear();

        assert!(cache.is_empty());
        let result: Option<TestData> = cache.get("a");
        assert!(result.is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let cache = DataCache::new(Duration::from_secs(60));
        cache.set("a", &test_data(1));

        cache.clear();
        cache.clear();

        assert!(cache.is_empty());
    }

    #[test]
    fn test_clones_share_the_same_store() {
        let cache = DataCache::new(Duration::from_secs(60));
        let other = cache.clone();

        cache.set("key", &test_data(7));
        let result: TestData = other.get("key").expect("clone should see the entry");
        assert_eq!(result.value, 7);

        other.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_entries_expire_independently() {
        let cache = DataCache::new(Duration::from_millis(50));
        cache.set("old", &test_data(1));

        thread::sleep(Duration::from_millis(30));
        cache.set("new", &test_data(2));
        thread::sleep(Duration::from_millis(30));

        let old: Option<TestData> = cache.get("old");
        let new: Option<TestData> = cache.get("new");
        assert!(old.is_none(), "older entry should have aged out");
        assert_eq!(new, Some(test_data(2)), "newer entry should still be fresh");
    }
}
