//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_all_handler, delete_handler, get_handler, health_handler, list_handler, set_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /v1/keys` - List all keys in insertion order
/// - `GET /v1/keys/:key` - Fetch a value, generating it on miss
/// - `POST /v1/keys/:key` - Create or replace a value
/// - `DELETE /v1/keys/:key` - Delete a key
/// - `DELETE /v1/keys` - Delete all keys
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/v1/keys", get(list_handler).delete(delete_all_handler))
        .route(
            "/v1/keys/:key",
            get(get_handler).post(set_handler).delete(delete_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheEngine, FixedValueGenerator};
    use crate::storage::MemoryStorage;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    async fn create_test_app() -> Router {
        let engine = CacheEngine::new(
            Arc::new(MemoryStorage::new()),
            Arc::new(FixedValueGenerator::new(json!("generated"))),
            "cache",
            100,
            Duration::from_secs(5),
        );
        engine.setup().await.unwrap();
        create_router(AppState::new(engine))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_endpoint_empty() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/keys")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint_created() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/keys/test")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("data=hello"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_delete_endpoint_absent_key() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/v1/keys/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
