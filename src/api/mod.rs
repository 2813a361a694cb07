//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `GET /v1/keys` - List all keys in insertion order
//! - `GET /v1/keys/:key` - Fetch a value, generating it on miss
//! - `POST /v1/keys/:key` - Create or replace a value
//! - `DELETE /v1/keys/:key` - Delete a key
//! - `DELETE /v1/keys` - Delete all keys
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
