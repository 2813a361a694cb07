//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies. Cache operation
//! responses are intentionally plain (a JSON array of keys, the raw value,
//! or the key string); only the health endpoint carries a structured body.

use serde::Serialize;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
