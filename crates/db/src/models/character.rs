//! Character entity model and DTOs.

use screenplay_core::character::{CharacterSheet, DEFAULT_ROLE};
use screenplay_core::types::{DbId, ProjectId, Timestamp};
use screenplay_core::validation::blank_to_none;
use sqlx::FromRow;

/// A character row from the `characters` table.
///
/// Column names predate the wire names: `vocal_rules` is `voice_rules` and
/// `behavior_rules` is `behavior_tells` on the wire.
#[derive(Debug, Clone, FromRow)]
pub struct Character {
    pub id: DbId,
    pub project_id: ProjectId,
    pub name: String,
    pub role: Option<String>,
    pub want: String,
    pub need: Option<String>,
    pub wound: Option<String>,
    pub misbelief: Option<String>,
    pub fear: Option<String>,
    pub moral_line: Option<String>,
    pub vocal_rules: Option<String>,
    pub behavior_rules: Option<String>,
    pub created_at: Timestamp,
}

impl Character {
    /// Convert to the wire shape, defaulting the role to `ally`.
    pub fn into_sheet(self) -> CharacterSheet {
        CharacterSheet {
            name: Some(self.name),
            role: Some(self.role.unwrap_or_else(|| DEFAULT_ROLE.to_string())),
            one_line: None,
            want: Some(self.want),
            need: self.need,
            wound: self.wound,
            misbelief: self.misbelief,
            fear: self.fear,
            moral_line: self.moral_line,
            voice_rules: self.vocal_rules,
            behavior_tells: self.behavior_rules,
            extra: Default::default(),
        }
    }
}

/// DTO for inserting a character.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCharacter {
    pub name: String,
    pub role: Option<String>,
    pub want: String,
    pub need: Option<String>,
    pub wound: Option<String>,
    pub misbelief: Option<String>,
    pub fear: Option<String>,
    pub moral_line: Option<String>,
    pub vocal_rules: Option<String>,
    pub behavior_rules: Option<String>,
}

impl NewCharacter {
    /// Build an insert row from a sheet, or `None` if it lacks a name or want.
    pub fn from_sheet(sheet: CharacterSheet) -> Option<Self> {
        if !sheet.is_storable() {
            return None;
        }
        Some(Self {
            name: sheet.name?,
            role: blank_to_none(sheet.role),
            want: sheet.want?,
            need: blank_to_none(sheet.need),
            wound: blank_to_none(sheet.wound),
            misbelief: blank_to_none(sheet.misbelief),
            fear: blank_to_none(sheet.fear),
            moral_line: blank_to_none(sheet.moral_line),
            vocal_rules: blank_to_none(sheet.voice_rules),
            behavior_rules: blank_to_none(sheet.behavior_tells),
        })
    }
}
