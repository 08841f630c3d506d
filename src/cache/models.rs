//! Cache entry and statistics models.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::time::Duration;

/// A stored response payload.
///
/// Entries are replaced wholesale on refresh and never mutated in place.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Fingerprint the entry is stored under.
    pub key: String,
    /// Parsed response payload.
    pub value: Value,
    /// When the entry was written.
    pub cached_at: DateTime<Utc>,
    /// When the entry stops being served. `None` never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Build an entry written now that lives for `ttl`.
    ///
    /// A TTL too large to represent as a timestamp is treated as no expiry.
    pub fn new(key: impl Into<String>, value: Value, ttl: Option<Duration>) -> Self {
        let cached_at = Utc::now();
        let expires_at = ttl
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .and_then(|ttl| cached_at.checked_add_signed(ttl));

        Self {
            key: key.into(),
            value,
            cached_at,
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires_at) if now >= expires_at)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Statistics for cache operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads that returned a live entry.
    pub hits: u64,
    /// Reads that found nothing or an expired entry.
    pub misses: u64,
    /// Entries written.
    pub writes: u64,
    /// Entries dropped to stay within capacity.
    pub evictions: u64,
    /// Entries dropped on read because their TTL had passed.
    pub expirations: u64,
}
