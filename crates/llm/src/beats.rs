//! Beat sheet generation with bounded repair.
//!
//! The model is asked for exactly [`BEAT_COUNT`] beats but routinely returns
//! fewer (or more). After the first attempt, up to
//! [`MAX_BEAT_CORRECTIONS`] follow-up calls replay the conversation with the
//! model's own answer and a corrective user turn. There is no backoff and no
//! merging of partial sheets: each correction replaces the previous answer.

use screenplay_core::beat::{correction_message, BeatSheet, BEAT_COUNT, MAX_BEAT_CORRECTIONS};
use screenplay_core::prompts::Prompt;
use screenplay_core::stage::Task;

use crate::completer::ChatCompleter;
use crate::error::LlmError;
use crate::messages::ChatMessage;
use crate::structured::{parse_document, request_for};

/// One model answer: the raw text we send back on correction, and the sheet
/// it parsed to. Unparsable answers count as an empty sheet.
struct Attempt {
    raw: String,
    sheet: BeatSheet,
}

impl Attempt {
    fn from_content(task: Task, content: Option<String>) -> Self {
        let raw = content.unwrap_or_else(|| task.empty_document().to_string());
        let sheet = match parse_document::<BeatSheet>(task, Some(&raw)) {
            Ok(sheet) => sheet,
            Err(e) => {
                tracing::warn!(error = %e, "Beat sheet was not valid JSON, treating as empty");
                BeatSheet::default()
            }
        };
        Self { raw, sheet }
    }
}

/// Generate a complete beat sheet, repairing short or long answers.
///
/// Makes at most `1 + MAX_BEAT_CORRECTIONS` calls. Transport and provider
/// errors abort immediately; a sheet that is still the wrong size after the
/// last correction yields [`LlmError::IncompleteBeats`].
pub async fn generate_beat_sheet(
    llm: &dyn ChatCompleter,
    prompt: &Prompt,
    model: &str,
) -> Result<BeatSheet, LlmError> {
    let base = request_for(Task::GenerateBeats, prompt, model);
    let mut attempt = Attempt::from_content(Task::GenerateBeats, llm.complete(&base).await?);
    tracing::info!(got = attempt.sheet.len(), "Beat sheet generated");

    for correction in 1..=MAX_BEAT_CORRECTIONS {
        if attempt.sheet.is_complete() {
            break;
        }
        let got = attempt.sheet.len();
        tracing::warn!(correction, got, expected = BEAT_COUNT, "Requesting beat sheet correction");

        let mut request = request_for(Task::CorrectBeats, prompt, model);
        request.messages.push(ChatMessage::assistant(attempt.raw));
        request.messages.push(ChatMessage::user(correction_message(got)));

        attempt = Attempt::from_content(Task::CorrectBeats, llm.complete(&request).await?);
        tracing::info!(correction, got = attempt.sheet.len(), "Corrected beat sheet received");
    }

    if !attempt.sheet.is_complete() {
        tracing::error!(got = attempt.sheet.len(), "Beat sheet incomplete after corrections");
        return Err(LlmError::IncompleteBeats {
            expected: BEAT_COUNT,
            got: attempt.sheet.len(),
        });
    }

    Ok(attempt.sheet)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use screenplay_core::prompts;

    use super::*;
    use crate::messages::Role;
    use crate::scripted::ScriptedCompleter;

    fn sheet_json(n: usize) -> String {
        let beats: Vec<_> = (1..=n)
            .map(|i| serde_json::json!({"num": i, "label": format!("Beat {i}"), "summary": "s"}))
            .collect();
        serde_json::json!({ "beats": beats }).to_string()
    }

    fn prompt() -> Prompt {
        prompts::generate_beats(Some("A courier witnesses a hit"), None, None)
    }

    #[tokio::test]
    async fn complete_first_answer_needs_one_call() {
        let llm = ScriptedCompleter::new([Some(sheet_json(40))]);
        let sheet = generate_beat_sheet(&llm, &prompt(), "m").await.unwrap();
        assert_eq!(sheet.len(), 40);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn short_answer_is_corrected() {
        let llm = ScriptedCompleter::new([Some(sheet_json(32)), Some(sheet_json(40))]);
        let sheet = generate_beat_sheet(&llm, &prompt(), "m").await.unwrap();
        assert!(sheet.is_complete());

        let requests = llm.requests();
        assert_eq!(requests.len(), 2);
        let correction = &requests[1];
        assert_eq!(correction.temperature, Task::CorrectBeats.temperature());
        assert_eq!(correction.messages.len(), 4);
        assert_eq!(correction.messages[2].role, Role::Assistant);
        assert_eq!(correction.messages[2].content, sheet_json(32));
        assert!(correction.messages[3]
            .content
            .starts_with("You returned 32 beats."));
    }

    #[tokio::test]
    async fn gives_up_after_two_corrections() {
        let llm = ScriptedCompleter::new([
            Some(sheet_json(10)),
            Some(sheet_json(20)),
            Some(sheet_json(39)),
            Some(sheet_json(40)),
        ]);
        let result = generate_beat_sheet(&llm, &prompt(), "m").await;
        assert_matches!(
            result,
            Err(LlmError::IncompleteBeats {
                expected: 40,
                got: 39
            })
        );
        assert_eq!(llm.calls(), 3);
    }

    #[tokio::test]
    async fn too_many_beats_also_corrected() {
        let llm = ScriptedCompleter::new([Some(sheet_json(44)), Some(sheet_json(40))]);
        let sheet = generate_beat_sheet(&llm, &prompt(), "m").await.unwrap();
        assert_eq!(sheet.len(), 40);
        assert!(llm.requests()[1].messages[3]
            .content
            .starts_with("You returned 44 beats."));
    }

    #[tokio::test]
    async fn prose_counts_as_zero_beats() {
        let llm = ScriptedCompleter::new([
            Some("I cannot do that.".to_string()),
            Some(sheet_json(40)),
        ]);
        let sheet = generate_beat_sheet(&llm, &prompt(), "m").await.unwrap();
        assert!(sheet.is_complete());
        let correction = &llm.requests()[1];
        assert_eq!(correction.messages[2].content, "I cannot do that.");
        assert!(correction.messages[3].content.starts_with("You returned 0 beats."));
    }

    #[tokio::test]
    async fn string_numbers_do_not_trigger_correction() {
        let beats: Vec<_> = (1..=40)
            .map(|i| serde_json::json!({"num": i.to_string(), "label": format!("Beat {i}")}))
            .collect();
        let content = serde_json::json!({ "beats": beats }).to_string();
        let llm = ScriptedCompleter::new([Some(content)]);

        let sheet = generate_beat_sheet(&llm, &prompt(), "m").await.unwrap();
        assert_eq!(llm.calls(), 1);
        assert_eq!(sheet.len(), 40);
        assert_eq!(sheet.beats[0].num, Some(1));
        assert_eq!(sheet.beats[39].num, Some(40));
    }

    #[tokio::test]
    async fn missing_content_is_replayed_as_empty_sheet() {
        let llm = ScriptedCompleter::new([None, Some(sheet_json(40))]);
        generate_beat_sheet(&llm, &prompt(), "m").await.unwrap();
        assert_eq!(llm.requests()[1].messages[2].content, r#"{"beats": []}"#);
    }

    #[tokio::test]
    async fn provider_error_aborts_loop() {
        let llm = ScriptedCompleter::failing(429, "Rate limit reached");
        let result = generate_beat_sheet(&llm, &prompt(), "m").await;
        assert_matches!(result, Err(LlmError::Api { status: 429, .. }));
        assert_eq!(llm.calls(), 1);
    }
}
