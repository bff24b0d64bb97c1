//! Story ingredients: theme equation, world brief, genre obligations, motifs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;
use crate::validation::non_blank;

/// A recurring image or object and what it signifies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotifEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub meaning: Option<String>,
}

/// The model often lists motifs as bare names.
impl From<String> for MotifEntry {
    fn from(name: String) -> Self {
        Self {
            name: Some(name),
            meaning: None,
        }
    }
}

impl MotifEntry {
    pub fn is_storable(&self) -> bool {
        non_blank(self.name.as_deref()).is_some()
    }
}

/// Ingredients proposed for a logline on the Ingredients stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ingredients {
    /// "Because __, the right choice is __, even at cost __."
    #[serde(deserialize_with = "lenient::text")]
    pub theme_equation: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub world_brief: Option<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub genre_obligations: Vec<String>,
    #[serde(deserialize_with = "lenient::text_list")]
    pub conventions: Vec<String>,
    #[serde(deserialize_with = "lenient::items")]
    pub motifs: Vec<MotifEntry>,
    /// Keys the model added beyond the schema, returned to the client as-is.
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_fills_defaults() {
        let ing: Ingredients =
            serde_json::from_str(r#"{"theme_equation": "Because x, y, even at z."}"#).unwrap();
        assert_eq!(ing.theme_equation.as_deref(), Some("Because x, y, even at z."));
        assert!(ing.motifs.is_empty());
        assert!(ing.conventions.is_empty());
    }

    #[test]
    fn motif_needs_a_name() {
        let unnamed = MotifEntry {
            name: None,
            meaning: Some("loss".into()),
        };
        assert!(!unnamed.is_storable());
    }

    #[test]
    fn string_motifs_become_named_entries() {
        let ing: Ingredients = serde_json::from_value(serde_json::json!({
            "motifs": ["rain", {"name": "clock", "meaning": "time running out"}],
            "conventions": "A ticking clock"
        }))
        .unwrap();
        assert_eq!(ing.motifs.len(), 2);
        assert_eq!(ing.motifs[0].name.as_deref(), Some("rain"));
        assert_eq!(ing.motifs[0].meaning, None);
        assert_eq!(ing.motifs[1].meaning.as_deref(), Some("time running out"));
        assert_eq!(ing.conventions, vec!["A ticking clock"]);
    }

    #[test]
    fn extra_keys_round_trip() {
        let ing: Ingredients = serde_json::from_value(serde_json::json!({
            "theme_equation": "Because x, y, even at z.",
            "tone": "bittersweet",
            "comparables": ["The Terminal"]
        }))
        .unwrap();
        let json = serde_json::to_value(&ing).unwrap();
        assert_eq!(json["tone"], "bittersweet");
        assert_eq!(json["comparables"][0], "The Terminal");
        assert_eq!(json["theme_equation"], "Because x, y, even at z.");
    }
}
