// CLI module for cachedapi

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cachedapi - Cached, authenticated HTTP API client
#[derive(Parser, Debug)]
#[command(name = "cachedapi", version, about, long_about = None)]
pub struct Args {
    /// Config file (default: ~/.cachedapi/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured base URL
    #[arg(long, global = true, env = "CACHEDAPI_BASE_URL")]
    pub base_url: Option<String>,

    /// Print metrics in Prometheus text format after the run
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a GET request and print the JSON response
    Get {
        /// Path relative to the base URL
        path: String,

        /// Query parameter as key=value (repeatable, order is kept)
        #[arg(short, long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,

        /// Bypass the response cache
        #[arg(long)]
        no_cache: bool,

        /// Issue the request this many times
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        repeat: u32,
    },

    /// Send a POST request with a JSON body and print the JSON response
    Post {
        /// Path relative to the base URL
        path: String,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },
}

impl Args {
    /// Apply flags that take precedence over every config source.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.client.base_url = base_url.clone();
        }
    }
}

/// Parse a `key=value` pair. The value may itself contain `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}
