#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use screenplay_llm::{ChatCompleter, LlmConfig};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use screenplay_api::config::{ServerConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
use screenplay_api::router::build_app_router;
use screenplay_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin and the default request
/// timeout, matching a development server. No provider key is read from the
/// environment; tests inject a scripted completer instead.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        llm: LlmConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9/v1".to_string(),
            model: "test-model".to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and completion backend.
pub fn build_test_app(pool: PgPool, llm: Option<Arc<dyn ChatCompleter>>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        llm,
    };
    build_app_router(state, &config)
}

/// A pool that never connects unless used. For endpoints that do not touch
/// the database (the LLM-backed stages).
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://screenplay@127.0.0.1:1/unused")
        .expect("lazy pool")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
