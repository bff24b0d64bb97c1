//! Liveness probe, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    /// `ok`, or `degraded` when the database cannot be reached.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// False when no provider key is set; the stage endpoints then answer 500.
    pub llm_configured: bool,
}

impl Health {
    fn new(db_healthy: bool, llm_configured: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            llm_configured,
        }
    }

    fn status_code(&self) -> StatusCode {
        if self.db_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /health
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    let db_healthy = match screenplay_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };
    let health = Health::new(db_healthy, state.llm.is_some());
    (health.status_code(), Json(health))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
