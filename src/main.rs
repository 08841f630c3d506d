// cachedapi - Cached, authenticated HTTP API client

use anyhow::{Context, Result};
use cachedapi::cache::{MemoryCache, ResponseCache};
use cachedapi::cli::{Args, Command};
use cachedapi::client::{RequestDescriptor, RequestDispatcher};
use cachedapi::config::AppConfig;
use cachedapi::metrics;
use cachedapi::utils::logging;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration, CLI flags win
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting cachedapi v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the cache and client
    let cache = Arc::new(MemoryCache::new(config.cache.max_entries));
    let client = RequestDispatcher::new(config.client.clone(), cache.clone())?;
    info!("Using API at {}", client.config().base_url);

    // Phase 4: Run the command
    match args.command {
        Command::Get {
            path,
            query,
            no_cache,
            repeat,
        } => {
            let mut descriptor = RequestDescriptor::get(path);
            descriptor.query = query;

            for _ in 0..repeat {
                let value = client.request(&descriptor, no_cache).await?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
        }
        Command::Post { path, body } => {
            let mut descriptor = RequestDescriptor::post(path);
            if let Some(raw) = body {
                let body = serde_json::from_str(&raw).context("--body is not valid JSON")?;
                descriptor = descriptor.json(body);
            }

            let value = client.request(&descriptor, false).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    let stats = cache.stats();
    info!(
        "Cache: {} entries, {} hits, {} misses, {} writes",
        cache.len(),
        stats.hits,
        stats.misses,
        stats.writes
    );

    if args.metrics {
        print!("{}", metrics::gather_metrics());
    }

    Ok(())
}
