// Environment layer tests, kept in their own binary so the variables
// they set cannot leak into other config tests running in parallel

use cachedapi::config::AppConfig;
use std::io::Write;
use std::time::Duration;

/// Sets variables for the lifetime of the guard.
struct EnvGuard {
    keys: Vec<&'static str>,
}

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        Self {
            keys: vars.iter().map(|(key, _)| *key).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn test_env_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[client]
base_url = "https://file"
client_id = "from-file"
use_cache = true
cache_duration_seconds = 60
"#
    )
    .unwrap();

    let _env = EnvGuard::set(&[
        ("CACHEDAPI_CLIENT__BASE_URL", "https://env"),
        ("CACHEDAPI_CLIENT__USE_CACHE", "false"),
        ("CACHEDAPI_CLIENT__CACHE_DURATION_SECONDS", "7"),
    ]);

    let config = AppConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.client.base_url, "https://env");
    assert!(!config.client.use_cache);
    assert_eq!(config.client.cache_duration_seconds, Some(7));
    assert_eq!(config.client.cache_duration(), Some(Duration::from_secs(7)));
    // Keys the environment does not set still come from the file
    assert_eq!(config.client.client_id.as_deref(), Some("from-file"));
}
