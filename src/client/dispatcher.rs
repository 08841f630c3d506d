// Request dispatcher with cache-read-before / cache-write-after semantics

use super::request::{resolve_url, Method, RequestDescriptor};
use crate::auth::AuthHeaderBuilder;
use crate::cache::{cache_key, ResponseCache};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::metrics;
use crate::utils::logging::sanitize;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Client for a JSON HTTP API.
///
/// Each call resolves the URL, checks the injected cache (GET only),
/// dispatches on a miss, parses the JSON body and writes it back to the
/// cache. Failed calls are returned as-is; nothing is retried.
///
/// Concurrent misses for the same key each hit the network and the last
/// cache write wins.
pub struct RequestDispatcher {
    http_client: Client,
    config: ClientConfig,
    auth: AuthHeaderBuilder,
    cache: Arc<dyn ResponseCache>,
}

impl RequestDispatcher {
    /// Create a dispatcher with its own pooled HTTP client.
    pub fn new(config: ClientConfig, cache: Arc<dyn ResponseCache>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(config.user_agent.as_str())
            .use_rustls_tls()
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client for {}", config.base_url);

        Self::with_http_client(config, cache, http_client)
    }

    /// Create a dispatcher around an existing `reqwest::Client`.
    pub fn with_http_client(
        config: ClientConfig,
        cache: Arc<dyn ResponseCache>,
        http_client: Client,
    ) -> Result<Self> {
        let auth = AuthHeaderBuilder::new(&config)?;

        Ok(Self {
            http_client,
            config,
            auth,
            cache,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the injected cache
    pub fn cache(&self) -> &Arc<dyn ResponseCache> {
        &self.cache
    }

    /// Resolve a path against the configured base URL.
    pub fn resolve(&self, descriptor: &RequestDescriptor) -> Result<String> {
        resolve_url(&self.config.base_url, &descriptor.path, &descriptor.query)
    }

    /// Execute one request.
    ///
    /// With `ignore_cache` set the cache is neither read nor written.
    pub async fn request(&self, descriptor: &RequestDescriptor, ignore_cache: bool) -> Result<Value> {
        let method = descriptor.method;
        let url = self.resolve(descriptor)?;
        let log_url = sanitize(&url);

        let key = (self.config.use_cache && !ignore_cache)
            .then(|| cache_key(method.as_str(), &url));

        if method == Method::Get {
            if let Some(key) = key.as_deref() {
                if let Some(value) = self.cache.get(key) {
                    debug!("Cache hit: {} {}", method, log_url);
                    metrics::record_cache_hit();
                    metrics::record_cached_request(method.as_str());
                    return Ok(value);
                }
                debug!("Cache miss: {} {}", method, log_url);
                metrics::record_cache_miss();
            }
        }

        let mut request = self
            .http_client
            .request(method.into(), &url)
            .headers(self.auth.build_headers());

        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        debug!("Dispatching {} {}", method, log_url);
        let start = Instant::now();

        let response = request.send().await.map_err(|e| {
            error!("{} {} failed: {}", method, log_url, sanitize(&e.to_string()));
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        metrics::record_network_request(method.as_str(), status.as_u16(), start.elapsed().as_secs_f64());

        if !status.is_success() {
            error!("{}", failure_message(method, &log_url, status.as_u16(), &body));
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let payload = parse_body(&body)?;

        if let Some(key) = key {
            self.cache.set(&key, payload.clone(), self.config.cache_duration());
            metrics::record_cache_write();
        }

        debug!("{} {} -> {}", method, log_url, status);
        Ok(payload)
    }

    /// GET `path` with query `params`, served from cache when possible.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.request(&with_params(RequestDescriptor::get(path), params), false)
            .await
    }

    /// GET `path`, bypassing the cache entirely.
    pub async fn get_fresh(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.request(&with_params(RequestDescriptor::get(path), params), true)
            .await
    }

    /// POST a JSON `body` to `path`.
    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.request(&RequestDescriptor::post(path).json(body), false)
            .await
    }

    /// Drop every cached response.
    pub fn flush_cache(&self) {
        self.cache.flush();
    }
}

fn with_params(descriptor: RequestDescriptor, params: &[(&str, &str)]) -> RequestDescriptor {
    params
        .iter()
        .fold(descriptor, |descriptor, (k, v)| descriptor.query(*k, *v))
}

/// Log line for a non-2xx response, with secrets in the body redacted.
fn failure_message(method: Method, url: &str, status: u16, body: &str) -> String {
    format!(
        "{} {} failed: HTTP {} - Response body: {}",
        method,
        url,
        status,
        sanitize(body)
    )
}

/// Parse a response body; an empty body is JSON `null`.
fn parse_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}
