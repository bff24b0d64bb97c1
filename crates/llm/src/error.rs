/// Errors from the chat-completion layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status or an `error` object.
    #[error("LLM API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Provider message, or the raw body when none was given.
        message: String,
    },

    /// The completion content was not the JSON document we asked for.
    #[error("Model returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The beat repair loop ran out of attempts.
    #[error("Model did not return {expected} beats after retries (got {got})")]
    IncompleteBeats { expected: usize, got: usize },
}
