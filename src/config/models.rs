//! Configuration data structures for cachedapi.
//!
//! Defines the schema for the client connection, authentication,
//! cache sizing and logging settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Upstream API connection and authentication settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Response cache sizing.
    #[serde(default)]
    pub cache: CacheSettings,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the upstream API a client talks to.
///
/// Each recognized option maps to exactly one behaviour:
/// `client_id` sets the `Client-ID` header, `bearer_token` sets the
/// `Authorization` header, `use_cache` gates cache consultation and
/// `cache_duration_seconds` sets the entry TTL.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every request path is resolved against.
    /// Default: `http://localhost`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value sent in the `Client-ID` header.
    #[serde(default)]
    pub client_id: Option<String>,

    /// Token sent as `Authorization: Bearer <token>`.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Whether responses are read from and written to the cache.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub use_cache: bool,

    /// Cache entry TTL in seconds. `0` keeps entries until flushed.
    /// Default: `300` (5 minutes)
    #[serde(default = "default_cache_duration")]
    pub cache_duration_seconds: Option<u64>,

    /// Request timeout in seconds. `0` disables the timeout.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Settings for the in-memory response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Maximum number of entries before least-recently-used eviction.
    /// Default: `1000`
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `warn`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `compact`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl ClientConfig {
    /// Configuration for `base_url` with every other option at its default.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// TTL applied to cache writes, `None` meaning no expiry.
    pub fn cache_duration(&self) -> Option<Duration> {
        match self.cache_duration_seconds {
            None | Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    /// Per-request timeout, `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

// Manual impl keeps the bearer token out of debug output
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("use_cache", &self.use_cache)
            .field("cache_duration_seconds", &self.cache_duration_seconds)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: None,
            bearer_token: None,
            use_cache: true,
            cache_duration_seconds: default_cache_duration(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}

fn default_true() -> bool {
    true
}

fn default_cache_duration() -> Option<u64> {
    Some(300)
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("cachedapi/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_entries() -> usize {
    1000
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}
