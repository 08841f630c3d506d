// Response cache module

pub mod manager;
pub mod models;

pub use manager::{cache_key, MemoryCache};
pub use models::{CacheEntry, CacheStats};

use serde_json::Value;
use std::time::Duration;

/// Key-value store for response payloads with optional per-entry expiry.
///
/// A miss is `None`, never an error. Implementations are shared across
/// requests through an `Arc` and must be usable from any task.
pub trait ResponseCache: Send + Sync {
    /// Value stored under `key`, or `None` if absent or expired.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, expiring after `ttl` (never if `None`).
    fn set(&self, key: &str, value: Value, ttl: Option<Duration>);

    /// Drop every entry.
    fn flush(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
