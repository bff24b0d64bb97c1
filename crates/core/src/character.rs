//! Character sheets produced on the Characters stage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient;
use crate::validation::non_blank;

/// Role reported for stored characters that never had one.
pub const DEFAULT_ROLE: &str = "ally";

/// A character sheet in the shape the client edits and the model returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSheet {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub role: Option<String>,
    /// One-sentence pitch. Returned by the model; not persisted.
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub one_line: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub want: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub need: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub wound: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub misbelief: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub fear: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub moral_line: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub voice_rules: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub behavior_tells: Option<String>,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// A bare string in a character list is taken as the name.
impl From<String> for CharacterSheet {
    fn from(name: String) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }
}

impl CharacterSheet {
    /// Only characters with both a name and a want are persisted.
    pub fn is_storable(&self) -> bool {
        non_blank(self.name.as_deref()).is_some() && non_blank(self.want.as_deref()).is_some()
    }
}

/// The `{"characters": [...]}` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cast {
    #[serde(default, deserialize_with = "lenient::items")]
    pub characters: Vec<CharacterSheet>,
}
