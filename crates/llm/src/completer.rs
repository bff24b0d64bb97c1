use async_trait::async_trait;

use crate::error::LlmError;
use crate::messages::ChatRequest;

/// Anything that can answer a chat completion request.
///
/// Returns the content of the first choice, or `None` when the provider
/// answered without any.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, LlmError>;
}
