//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the bounded collection backing the cache
    pub cache_name: String,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Timeout in milliseconds for a single storage round trip
    pub storage_op_timeout_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_NAME` - Collection name (default: "cache")
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STORAGE_OP_TIMEOUT_MS` - Per-operation storage timeout (default: 5000)
    pub fn from_env() -> Self {
        Self {
            cache_name: env::var("CACHE_NAME").unwrap_or_else(|_| "cache".to_string()),
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            storage_op_timeout_ms: env::var("STORAGE_OP_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_name: "cache".to_string(),
            max_entries: 1000,
            server_port: 3000,
            storage_op_timeout_ms: 5000,
        }
    }
}
