//! Per-beat coaching documents: validation scores and scene expectations.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::lenient;

/// The beat a coaching request is about. Only label and summary matter.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BeatDraft {
    pub label: Option<String>,
    pub summary: Option<String>,
}

/// A score as the model wrote it: usually a number, sometimes `"7/10"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Number(f64),
    Text(String),
}

impl ScoreValue {
    /// The numeric value, reading text scores by their leading number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => lenient::leading_number(s),
        }
    }
}

/// Numbers and text are kept; any other shape counts as no score.
fn score<'de, D>(deserializer: D) -> Result<Option<ScoreValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().map(ScoreValue::Number),
        Some(Value::String(s)) => Some(ScoreValue::Text(s)),
        _ => None,
    })
}

/// Absent scores stay absent on the way back to the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeatScore {
    #[serde(deserialize_with = "score", skip_serializing_if = "Option::is_none")]
    pub purpose: Option<ScoreValue>,
    #[serde(deserialize_with = "score", skip_serializing_if = "Option::is_none")]
    pub stakes: Option<ScoreValue>,
    #[serde(deserialize_with = "score", skip_serializing_if = "Option::is_none")]
    pub causality: Option<ScoreValue>,
    #[serde(deserialize_with = "score", skip_serializing_if = "Option::is_none")]
    pub freshness: Option<ScoreValue>,
    #[serde(deserialize_with = "score", skip_serializing_if = "Option::is_none")]
    pub clarity: Option<ScoreValue>,
    #[serde(deserialize_with = "score", skip_serializing_if = "Option::is_none")]
    pub overall: Option<ScoreValue>,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl BeatScore {
    pub fn overall(&self) -> Option<f64> {
        self.overall.as_ref().and_then(ScoreValue::as_f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeatDiagnostics {
    #[serde(deserialize_with = "lenient::flag")]
    pub is_scene_worthy: bool,
    /// Missing elements, e.g. `stakes`, `turn`, `value_shift`.
    #[serde(deserialize_with = "lenient::text_list")]
    pub missing: Vec<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub conflicts_with_theme: bool,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// A story editor's evaluation of one beat against the logline and theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeatEvaluation {
    pub score: BeatScore,
    pub diagnostics: BeatDiagnostics,
    #[serde(deserialize_with = "lenient::text_list")]
    pub notes: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub rewrite_suggestion: Option<String>,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MicroPrompts {
    #[serde(deserialize_with = "lenient::text_or_empty")]
    pub open: String,
    #[serde(deserialize_with = "lenient::text_or_empty")]
    pub middle: String,
    #[serde(deserialize_with = "lenient::text_or_empty")]
    pub close: String,
}

/// What a scene built on a beat has to deliver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneExpectations {
    #[serde(deserialize_with = "lenient::text_list")]
    pub what_must_happen: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub checklist: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub watchouts: Vec<String>,
    pub micro_prompts: MicroPrompts,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}
