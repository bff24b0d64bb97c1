//! Writing stages and the LLM tasks that back them.
//!
//! A [`Stage`] is one step of the screenplay workflow as the client presents
//! it. A [`Task`] is one kind of completion request; several tasks may belong
//! to the same stage (beat generation and beat coaching both live on Beats).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The writing stages, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Logline,
    Ingredients,
    Characters,
    Beats,
    Scenes,
    Polish,
    Export,
}

impl Stage {
    /// All stages in the order the client shows them.
    pub const ALL: [Stage; 7] = [
        Stage::Logline,
        Stage::Ingredients,
        Stage::Characters,
        Stage::Beats,
        Stage::Scenes,
        Stage::Polish,
        Stage::Export,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Logline => "logline",
            Stage::Ingredients => "ingredients",
            Stage::Characters => "characters",
            Stage::Beats => "beats",
            Stage::Scenes => "scenes",
            Stage::Polish => "polish",
            Stage::Export => "export",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A kind of completion request, carrying its sampling preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    RefineLogline,
    RefineIngredients,
    RefineCharacters,
    GenerateBeats,
    CorrectBeats,
    ValidateBeat,
    SceneExpectations,
}

impl Task {
    /// The stage this task serves.
    pub fn stage(self) -> Stage {
        match self {
            Task::RefineLogline => Stage::Logline,
            Task::RefineIngredients => Stage::Ingredients,
            Task::RefineCharacters => Stage::Characters,
            Task::GenerateBeats | Task::CorrectBeats | Task::ValidateBeat => Stage::Beats,
            Task::SceneExpectations => Stage::Scenes,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Task::RefineLogline => "refine_logline",
            Task::RefineIngredients => "refine_ingredients",
            Task::RefineCharacters => "refine_characters",
            Task::GenerateBeats => "generate_beats",
            Task::CorrectBeats => "correct_beats",
            Task::ValidateBeat => "validate_beat",
            Task::SceneExpectations => "scene_expectations",
        }
    }

    /// Sampling temperature, or `None` to use the provider default.
    pub fn temperature(self) -> Option<f32> {
        match self {
            Task::RefineLogline => None,
            Task::RefineIngredients => Some(0.5),
            Task::RefineCharacters | Task::GenerateBeats => Some(0.4),
            Task::SceneExpectations => Some(0.3),
            Task::CorrectBeats | Task::ValidateBeat => Some(0.2),
        }
    }

    /// Whether the request asks the provider for a JSON object response.
    pub fn json_mode(self) -> bool {
        !matches!(self, Task::RefineLogline)
    }

    /// Document substituted when the provider returns no content at all.
    pub fn empty_document(self) -> &'static str {
        match self {
            Task::RefineCharacters => r#"{"characters": []}"#,
            Task::GenerateBeats | Task::CorrectBeats => r#"{"beats": []}"#,
            Task::RefineLogline => "",
            _ => "{}",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_in_workflow_order() {
        let names: Vec<_> = Stage::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            ["logline", "ingredients", "characters", "beats", "scenes", "polish", "export"]
        );
    }

    #[test]
    fn logline_is_plain_text_with_default_temperature() {
        assert!(!Task::RefineLogline.json_mode());
        assert_eq!(Task::RefineLogline.temperature(), None);
    }

    #[test]
    fn corrections_run_cooler_than_generation() {
        let generate = Task::GenerateBeats.temperature().unwrap();
        let correct = Task::CorrectBeats.temperature().unwrap();
        assert!(correct < generate);
        assert_eq!(Task::CorrectBeats.stage(), Stage::Beats);
    }

    #[test]
    fn empty_documents_parse_as_json() {
        for task in [
            Task::RefineIngredients,
            Task::RefineCharacters,
            Task::GenerateBeats,
            Task::ValidateBeat,
            Task::SceneExpectations,
        ] {
            let parsed: serde_json::Value = serde_json::from_str(task.empty_document()).unwrap();
            assert!(parsed.is_object(), "{task} fallback must be an object");
        }
    }

    #[test]
    fn stage_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Stage::Beats).unwrap(), "\"beats\"");
    }
}
