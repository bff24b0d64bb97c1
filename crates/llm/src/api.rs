//! REST client for an OpenAI-compatible chat completion API.
//!
//! Wraps `POST {base_url}/chat/completions` using [`reqwest`]. The base URL
//! is configurable so a local or proxy server speaking the same protocol can
//! stand in for the hosted API.

use std::time::Duration;

use async_trait::async_trait;

use crate::completer::ChatCompleter;
use crate::error::LlmError;
use crate::messages::{ChatRequest, ChatResponse};

/// Default hosted endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for every stage.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Timeout for a single completion call. A full 40-beat sheet can take well
/// over a minute.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(110);

/// LLM provider settings loaded from the environment.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer token. `None` disables every LLM-backed endpoint.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl LlmConfig {
    /// Build from a key lookup. A blank key counts as unset.
    ///
    /// | Env Var           | Default                     |
    /// |-------------------|-----------------------------|
    /// | `OPENAI_API_KEY`  | unset                       |
    /// | `OPENAI_BASE_URL` | `https://api.openai.com/v1` |
    /// | `OPENAI_MODEL`    | `gpt-4o`                    |
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());

        let base_url = lookup("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model = lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());

        Self {
            api_key,
            base_url,
            model,
        }
    }
}

/// HTTP client for the chat completion endpoint.
pub struct OpenAiApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiApi {
    /// Create a client with its own connection pool and request timeout.
    ///
    /// * `base_url` - API root without the trailing path, e.g.
    ///   `https://api.openai.com/v1`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(CALL_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from config, or `None` when no API key is configured.
    pub fn from_config(config: &LlmConfig) -> Result<Option<Self>, LlmError> {
        match &config.api_key {
            Some(key) => Ok(Some(Self::new(config.base_url.clone(), key.clone())?)),
            None => Ok(None),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Map a raw response to content, surfacing provider errors.
    async fn parse_response(response: reqwest::Response) -> Result<Option<String>, LlmError> {
        let status = response.status();
        let body = response.text().await?;

        let parsed = serde_json::from_str::<ChatResponse>(&body);
        match parsed {
            Ok(chat) => {
                if let Some(err) = chat.error {
                    return Err(LlmError::Api {
                        status: status.as_u16(),
                        message: err.message.unwrap_or_else(|| "OpenAI error".to_string()),
                    });
                }
                if !status.is_success() {
                    return Err(LlmError::Api {
                        status: status.as_u16(),
                        message: body,
                    });
                }
                Ok(chat.into_content())
            }
            Err(_) if !status.is_success() => Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            }),
            Err(e) => Err(LlmError::InvalidJson(e)),
        }
    }
}

#[async_trait]
impl ChatCompleter for OpenAiApi {
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, LlmError> {
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
