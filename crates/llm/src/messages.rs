//! Wire types for the OpenAI-compatible `/chat/completions` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// `response_format` value; only JSON-object mode is used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

/// Body of a chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// Provider error object, e.g. `{"error": {"message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a chat completion response. Providers may return an `error`
/// object instead of choices, sometimes with a 200 status.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

impl ChatResponse {
    /// Content of the first choice, if any.
    pub fn into_content(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_options() {
        let req = ChatRequest {
            model: "gpt-4o".into(),
            temperature: None,
            response_format: None,
            messages: vec![ChatMessage::user("hi")],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("temperature").is_none());
        assert!(json.get("response_format").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn json_mode_serializes_type_key() {
        let json = serde_json::to_value(ResponseFormat::json_object()).unwrap();
        assert_eq!(json, serde_json::json!({"type": "json_object"}));
    }

    #[test]
    fn response_content_from_first_choice() {
        let resp: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"a\":1}"}}]
        }))
        .unwrap();
        assert_eq!(resp.into_content().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn error_body_parses() {
        let resp: ChatResponse = serde_json::from_value(serde_json::json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        }))
        .unwrap();
        assert!(resp.choices.is_empty());
        assert_eq!(
            resp.error.unwrap().message.as_deref(),
            Some("Incorrect API key provided")
        );
    }
}
