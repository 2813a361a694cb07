//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found (delete of an absent key)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Storage collaborator unreachable or timed out
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Collection or index creation failed for a reason other than already-exists
    #[error("Setup failed: {0}")]
    SetupFailed(String),

    /// Miss-path generate-then-store did not complete
    #[error("Generation failed for key '{key}': {reason}")]
    GenerationFailed { key: String, reason: String },

    /// Unexpected unique-index violation on write
    #[error("Write conflict: {0}")]
    WriteConflict(String),
}

impl CacheError {
    /// Stable machine-readable code used in error response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            CacheError::NotFound(_) => "not_found",
            CacheError::InvalidRequest(_) => "invalid_request",
            CacheError::StorageUnavailable(_) => "storage_unavailable",
            CacheError::SetupFailed(_) => "setup_failed",
            CacheError::GenerationFailed { .. } => "generation_failed",
            CacheError::WriteConflict(_) => "write_conflict",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::SetupFailed(_)
            | CacheError::GenerationFailed { .. }
            | CacheError::WriteConflict(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
