//! Motif entity model and DTOs.

use screenplay_core::ingredients::MotifEntry;
use screenplay_core::types::{DbId, ProjectId, Timestamp};
use screenplay_core::validation::blank_to_none;
use sqlx::FromRow;

/// A motif row from the `motifs` table.
#[derive(Debug, Clone, FromRow)]
pub struct Motif {
    pub id: DbId,
    pub project_id: ProjectId,
    pub name: String,
    pub meaning: Option<String>,
    pub created_at: Timestamp,
}

impl From<Motif> for MotifEntry {
    fn from(row: Motif) -> Self {
        MotifEntry {
            name: Some(row.name),
            meaning: row.meaning,
        }
    }
}

/// DTO for inserting a motif.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMotif {
    pub name: String,
    pub meaning: Option<String>,
}

impl NewMotif {
    /// Build an insert row, or `None` if the motif is unnamed.
    pub fn from_entry(entry: MotifEntry) -> Option<Self> {
        if !entry.is_storable() {
            return None;
        }
        Some(Self {
            name: entry.name?,
            meaning: blank_to_none(entry.meaning),
        })
    }
}
