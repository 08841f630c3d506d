// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
    CACHE_OPERATIONS,
    CACHE_ENTRIES,
};

/// Helper to record a request answered by the upstream API
pub fn record_network_request(method: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[method, &status_code.to_string(), "network"])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method])
        .observe(duration_secs);
}

/// Helper to record a request answered from the cache
pub fn record_cached_request(method: &str) {
    REQUESTS_TOTAL
        .with_label_values(&[method, "cached", "cache"])
        .inc();
}

/// Helpers to record response cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn record_cache_write() {
    CACHE_OPERATIONS.with_label_values(&["write"]).inc();
}

pub fn record_cache_eviction() {
    CACHE_OPERATIONS.with_label_values(&["eviction"]).inc();
}

pub fn record_cache_flush() {
    CACHE_OPERATIONS.with_label_values(&["flush"]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.with_label_values(&["active"]).set(count as f64);
}
