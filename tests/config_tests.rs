// Configuration loading tests

use cachedapi::config::{AppConfig, CacheSettings, ClientConfig};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_client_config_defaults() {
    let config = ClientConfig::default();

    assert!(config.use_cache);
    assert_eq!(config.cache_duration(), Some(Duration::from_secs(300)));
    assert_eq!(config.timeout_seconds, 30);
    assert!(config.client_id.is_none());
    assert!(config.bearer_token.is_none());
    assert!(config.user_agent.starts_with("cachedapi/"));
}

#[test]
fn test_cache_settings_defaults() {
    assert_eq!(CacheSettings::default().max_entries, 1000);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[client]
base_url = "https://api.example.com/helix"
client_id = "abc"
use_cache = false
cache_duration_seconds = 60

[cache]
max_entries = 5

[logging]
level = "debug"
format = "json"
"#
    )
    .unwrap();

    let config = AppConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.client.base_url, "https://api.example.com/helix");
    assert_eq!(config.client.client_id.as_deref(), Some("abc"));
    assert!(config.client.bearer_token.is_none());
    assert!(!config.client.use_cache);
    assert_eq!(config.client.cache_duration(), Some(Duration::from_secs(60)));
    // Unset keys keep their defaults
    assert_eq!(config.client.timeout_seconds, 30);
    assert_eq!(config.cache.max_entries, 5);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    assert!(AppConfig::load(Some(&missing)).is_err());
}
