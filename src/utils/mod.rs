//! Utility functions and helpers for cachedapi.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and credential redaction.

pub mod logging;
