// ABOUTME: Configuration and environment variable management for Stockroom
// ABOUTME: Centralizes env var names and lookup helpers used across packages

pub mod constants;

pub use constants::*;

use std::env;

/// Read an environment variable, logging at debug level when it is absent
pub fn env_or_default(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            tracing::debug!("{} not set, using default '{}'", name, default);
            default.to_string()
        }
    }
}
