//! Single-turn completions for a [`Task`], returning text or parsed JSON.

use screenplay_core::prompts::Prompt;
use screenplay_core::stage::Task;
use serde::de::DeserializeOwned;

use crate::completer::ChatCompleter;
use crate::error::LlmError;
use crate::messages::{ChatMessage, ChatRequest, ResponseFormat};

/// Build the request for a task: its sampling preset plus the prompt pair.
pub fn request_for(task: Task, prompt: &Prompt, model: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        temperature: task.temperature(),
        response_format: task.json_mode().then(ResponseFormat::json_object),
        messages: vec![
            ChatMessage::system(prompt.system.clone()),
            ChatMessage::user(prompt.user.clone()),
        ],
    }
}

/// Parse completion content for a task, substituting the task's empty
/// document when the provider returned nothing.
pub fn parse_document<T: DeserializeOwned>(
    task: Task,
    content: Option<&str>,
) -> Result<T, serde_json::Error> {
    let raw = content.unwrap_or_else(|| task.empty_document());
    serde_json::from_str(raw)
}

/// Run a plain-text task. Missing content becomes an empty string.
pub async fn complete_text(
    llm: &dyn ChatCompleter,
    task: Task,
    prompt: &Prompt,
    model: &str,
) -> Result<String, LlmError> {
    let request = request_for(task, prompt, model);
    let content = llm.complete(&request).await?;
    tracing::debug!(
        task = %task,
        stage = %task.stage(),
        chars = content.as_ref().map_or(0, String::len),
        "Text completion received"
    );
    Ok(content.unwrap_or_default())
}

/// Run a JSON-mode task and deserialize the result.
pub async fn complete_json<T: DeserializeOwned>(
    llm: &dyn ChatCompleter,
    task: Task,
    prompt: &Prompt,
    model: &str,
) -> Result<T, LlmError> {
    let request = request_for(task, prompt, model);
    let content = llm.complete(&request).await?;
    let parsed = parse_document(task, content.as_deref()).map_err(|e| {
        tracing::warn!(task = %task, error = %e, "Completion was not valid JSON");
        LlmError::InvalidJson(e)
    })?;
    tracing::debug!(task = %task, stage = %task.stage(), "JSON completion parsed");
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use screenplay_core::character::Cast;
    use screenplay_core::ingredients::Ingredients;
    use screenplay_core::prompts;

    use super::*;
    use crate::scripted::ScriptedCompleter;

    #[test]
    fn request_carries_task_preset() {
        let prompt = prompts::refine_ingredients(Some("L"), None, None);
        let req = request_for(Task::RefineIngredients, &prompt, "gpt-4o");
        assert_eq!(req.temperature, Some(0.5));
        assert_eq!(req.response_format, Some(ResponseFormat::json_object()));
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0], ChatMessage::system(prompt.system));
    }

    #[test]
    fn logline_request_is_plain_text() {
        let prompt = prompts::refine_logline(Some("idea"), None, None);
        let req = request_for(Task::RefineLogline, &prompt, "m");
        assert_eq!(req.response_format, None);
        assert_eq!(req.temperature, None);
    }

    #[test]
    fn missing_content_uses_empty_document() {
        let cast: Cast = parse_document(Task::RefineCharacters, None).unwrap();
        assert!(cast.characters.is_empty());
    }

    #[tokio::test]
    async fn complete_json_parses_content() {
        let llm = ScriptedCompleter::new([Some(
            r#"{"theme_equation": "Because home matters, stay, even at cost of pride."}"#,
        )]);
        let prompt = prompts::refine_ingredients(Some("L"), None, None);
        let ing: Ingredients = complete_json(&llm, Task::RefineIngredients, &prompt, "m")
            .await
            .unwrap();
        assert!(ing.theme_equation.unwrap().starts_with("Because home"));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn complete_json_rejects_prose() {
        let llm = ScriptedCompleter::new([Some("Sure! Here are your ingredients.")]);
        let prompt = prompts::refine_ingredients(None, None, None);
        let result: Result<Ingredients, _> =
            complete_json(&llm, Task::RefineIngredients, &prompt, "m").await;
        assert_matches!(result, Err(LlmError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn complete_text_defaults_to_empty() {
        let llm = ScriptedCompleter::new([None::<&str>]);
        let prompt = prompts::refine_logline(None, None, None);
        let text = complete_text(&llm, Task::RefineLogline, &prompt, "m")
            .await
            .unwrap();
        assert_eq!(text, "");
    }
}
