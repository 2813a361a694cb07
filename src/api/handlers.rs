//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Form, Json,
};
use serde_json::Value;

use crate::cache::{CacheEngine, RandomValueGenerator, SetOutcome};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{form_fields_to_value, HealthResponse, ListParams};
use crate::storage::MemoryStorage;

/// Application state shared across all handlers.
///
/// The engine is internally synchronized, so handlers share one instance
/// behind an Arc without additional locking.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache engine
    pub engine: Arc<CacheEngine>,
}

impl AppState {
    /// Creates a new AppState with the given engine.
    pub fn new(engine: CacheEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Creates a new AppState from configuration, wiring the in-memory
    /// storage backend and the default random value generator.
    pub fn from_config(config: &Config) -> Self {
        let engine = CacheEngine::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(RandomValueGenerator),
            config.cache_name.clone(),
            config.max_entries,
            Duration::from_millis(config.storage_op_timeout_ms),
        );
        Self::new(engine)
    }
}

/// Handler for GET /v1/keys
///
/// Returns all keys in insertion order, oldest first. Optional
/// `offset`/`limit` query parameters page through the snapshot.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<String>>> {
    let keys = state.engine.list(params.offset, params.limit).await?;
    Ok(Json(keys))
}

/// Handler for GET /v1/keys/:key
///
/// Returns the value for the key, generating and storing one if the key is
/// absent. The hit/generated distinction is internal; the response body is
/// the value either way.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>> {
    let lookup = state.engine.get(&key).await?;
    Ok(Json(lookup.into_value()))
}

/// Handler for POST /v1/keys/:key
///
/// Stores the form-encoded body as the value for the key. Responds 201 with
/// the key if a new record was created, 200 if an existing one was replaced.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<(StatusCode, Json<String>)> {
    let value = form_fields_to_value(fields);
    let outcome = state.engine.set(&key, value).await?;

    let status = match outcome {
        SetOutcome::Created => StatusCode::CREATED,
        SetOutcome::Updated => StatusCode::OK,
    };
    Ok((status, Json(key)))
}

/// Handler for DELETE /v1/keys/:key
///
/// Responds 204 if the key was removed, 404 if it did not exist.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode> {
    if state.engine.delete_key(&key).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for DELETE /v1/keys
///
/// Removes every key; capacity configuration is untouched. Storage errors
/// propagate as 5xx rather than being discarded.
pub async fn delete_all_handler(State(state): State<AppState>) -> Result<StatusCode> {
    state.engine.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
