use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use screenplay_core::error::CoreError;
use screenplay_llm::LlmError;
use serde::Serialize;

/// Error type returned by every handler.
///
/// Rendered as `{"error": <message>, "code": <CODE>}`. Internal details are
/// logged, never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A completion call failed or returned unusable output.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// No provider key is configured, so the stage endpoints are unavailable.
    #[error("Missing OPENAI_API_KEY")]
    LlmNotConfigured,

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    /// HTTP status, machine-readable code and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal()
            }
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Llm(err) => classify_llm_error(err),
            AppError::LlmNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "LLM_NOT_CONFIGURED",
                self.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a completion error. All of them are the upstream's fault, so
/// they map to 502 with a code telling the client which kind it was.
fn classify_llm_error(err: &LlmError) -> (StatusCode, &'static str, String) {
    match err {
        LlmError::IncompleteBeats { expected, got } => {
            tracing::warn!(expected, got, "Beat generation gave up");
            (
                StatusCode::BAD_GATEWAY,
                "INCOMPLETE_BEATS",
                format!("Model did not return {expected} beats after retries."),
            )
        }
        LlmError::Api { status, message } => {
            tracing::error!(status, error = %message, "LLM provider error");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message.clone())
        }
        LlmError::InvalidJson(e) => {
            tracing::error!(error = %e, "LLM returned invalid JSON");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_INVALID_JSON",
                err.to_string(),
            )
        }
        LlmError::Request(e) => {
            tracing::error!(error = %e, "LLM request failed");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                "The language model service could not be reached".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Foreign key violations map to 404 (the parent project is gone).
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Referenced project not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
