use std::sync::Arc;

use screenplay_llm::ChatCompleter;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: screenplay_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Chat completion backend. `None` when no API key is configured.
    pub llm: Option<Arc<dyn ChatCompleter>>,
}

impl AppState {
    /// The configured completion backend, or [`AppError::LlmNotConfigured`].
    pub fn llm(&self) -> AppResult<&dyn ChatCompleter> {
        self.llm.as_deref().ok_or(AppError::LlmNotConfigured)
    }

    /// Model name sent with every completion request.
    pub fn model(&self) -> &str {
        &self.config.llm.model
    }
}
