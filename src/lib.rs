// cachedapi - Cached, authenticated HTTP API client

pub mod auth;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;
