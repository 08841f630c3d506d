// In-memory response cache and cache key generation

use crate::cache::models::{CacheEntry, CacheStats};
use crate::cache::ResponseCache;
use crate::metrics;
use chrono::Utc;
use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::time::Duration;
use tracing::debug;

/// Generate the SHA256 cache key for a request.
///
/// The key covers the method and the fully resolved URL, query string
/// included. Request bodies are not part of the key.
pub fn cache_key(method: &str, resolved_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.to_ascii_uppercase().as_bytes());
    hasher.update(b" ");
    hasher.update(resolved_url.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn short_key(key: &str) -> String {
    key.chars().take(16).collect()
}

struct Inner {
    entries: LruCache<String, CacheEntry>,
    stats: CacheStats,
}

/// Bounded in-memory cache with lazy per-entry expiry.
///
/// Expired entries are dropped when a read finds them; there is no
/// background sweeper. Once `max_entries` is reached the least recently
/// used entry is evicted to make room.
pub struct MemoryCache {
    inner: Mutex<Inner>,
}

impl MemoryCache {
    /// Create a cache holding at most `max_entries` entries (minimum 1).
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                stats: CacheStats::default(),
            }),
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats.clone()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().entries.cap().get()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let expired = match inner.entries.peek(key) {
            Some(entry) => entry.is_expired_at(Utc::now()),
            None => {
                inner.stats.misses += 1;
                return None;
            }
        };

        if expired {
            debug!("Dropping expired cache entry: {}", short_key(key));
            inner.entries.pop(key);
            inner.stats.misses += 1;
            inner.stats.expirations += 1;
            metrics::update_cache_entries(inner.entries.len());
            return None;
        }

        inner.stats.hits += 1;
        inner.entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) {
        let entry = CacheEntry::new(key, value, ttl);

        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if let Some((evicted_key, _)) = inner.entries.push(key.to_string(), entry) {
            // push hands back the old entry when the key was already present
            if evicted_key != key {
                debug!("Evicted least recently used cache entry: {}", short_key(&evicted_key));
                inner.stats.evictions += 1;
                metrics::record_cache_eviction();
            }
        }
        inner.stats.writes += 1;
        metrics::update_cache_entries(inner.entries.len());
    }

    fn flush(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        metrics::record_cache_flush();
        metrics::update_cache_entries(0);
        debug!("Cache cleared");
    }

    fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread;

    #[test]
    fn test_cache_key_generation() {
        let key1 = cache_key("GET", "https://api.example.com/users");
        let key2 = cache_key("GET", "https://api.example.com/users");

        // Same inputs should produce same key
        assert_eq!(key1, key2);
        assert_eq!(key1.len(), 64);

        // Method case does not matter
        assert_eq!(key1, cache_key("get", "https://api.example.com/users"));

        // Different method or URL should produce different key
        assert_ne!(key1, cache_key("POST", "https://api.example.com/users"));
        assert_ne!(key1, cache_key("GET", "https://api.example.com/users?page=2"));
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let cache = MemoryCache::new(10);
        cache.set("users", json!({"data": [1, 2, 3]}), Some(Duration::from_secs(60)));

        assert_eq!(cache.get("users"), Some(json!({"data": [1, 2, 3]})));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_returns_none_after_ttl() {
        let cache = MemoryCache::new(10);
        cache.set("short", json!("value"), Some(Duration::from_millis(20)));

        thread::sleep(Duration::from_millis(60));

        assert_eq!(cache.get("short"), None);
        // Expired entry is dropped on read
        assert!(cache.is_empty());
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_missing_key_is_a_miss() {
        let cache = MemoryCache::new(10);
        assert_eq!(cache.get("absent"), None);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn test_set_replaces_existing_entry() {
        let cache = MemoryCache::new(10);
        cache.set("k", json!(1), None);
        cache.set("k", json!(2), None);

        assert_eq!(cache.get("k"), Some(json!(2)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.stats().writes, 2);
    }

    #[test]
    fn test_flush_clears_all_entries() {
        let cache = MemoryCache::new(10);
        cache.set("a", json!(1), None);
        cache.set("b", json!(2), None);

        cache.flush();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn test_lru_eviction_at_capacity() {
        let cache = MemoryCache::new(2);
        cache.set("a", json!(1), None);
        cache.set("b", json!(2), None);

        // Touch "a" so "b" becomes least recently used
        assert_eq!(cache.get("a"), Some(json!(1)));
        cache.set("c", json!(3), None);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(json!(1)));
        assert_eq!(cache.get("c"), Some(json!(3)));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache = MemoryCache::new(0);
        assert_eq!(cache.capacity(), 1);
    }
}
