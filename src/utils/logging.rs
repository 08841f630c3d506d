//! Structured logging and secret redaction utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to keep
//! credentials (bearer tokens, token query parameters) out of logs.

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for ingestion.
/// - `pretty`: Human-readable, multi-line output.
/// - `compact` (default): One line per event, written to stderr so
///   response payloads on stdout stay machine-readable.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

const REDACTED: &str = "[REDACTED]";

/// Query parameter names whose values are treated as secrets.
const SECRET_PARAMS: &[&str] = &["access_token=", "token=", "api_key=", "client_secret="];

/// Sanitizes sensitive information from log messages.
///
/// Replaces the credential following `Bearer ` and the values of
/// well-known secret query parameters with a `\[REDACTED\]` placeholder.
pub fn sanitize(input: &str) -> String {
    let mut result = input.to_string();

    // Pattern 1: Authorization bearer credentials
    result = redact_after(&result, "Bearer ", |c: char| {
        c.is_whitespace() || c == '"' || c == '\''
    });

    // Pattern 2: secret query parameters, terminated by '&' or '#'
    for param in SECRET_PARAMS {
        result = redact_after(&result, param, |c: char| {
            c == '&' || c == '#' || c.is_whitespace() || c == '"' || c == '\''
        });
    }

    result
}

/// Redact every value that follows `marker`, up to the first `is_end` char.
fn redact_after(input: &str, marker: &str, is_end: impl Fn(char) -> bool) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        let value_start = pos + marker.len();
        output.push_str(&rest[..value_start]);

        let tail = &rest[value_start..];
        let value_len = tail.find(|c: char| is_end(c)).unwrap_or(tail.len());
        if value_len > 0 {
            output.push_str(REDACTED);
        }
        rest = &tail[value_len..];
    }

    output.push_str(rest);
    output
}
