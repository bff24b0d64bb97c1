//! Beat entity model and DTOs.

use screenplay_core::beat::Beat;
use screenplay_core::types::{DbId, ProjectId, Timestamp};
use screenplay_core::validation::blank_to_none;
use sqlx::FromRow;

/// A beat row from the `beats` table. `idx` is the wire `num`.
#[derive(Debug, Clone, FromRow)]
pub struct BeatRow {
    pub id: DbId,
    pub project_id: ProjectId,
    pub idx: Option<i32>,
    pub label: Option<String>,
    pub summary: Option<String>,
    pub purpose: Option<String>,
    pub stakes: Option<String>,
    pub created_at: Timestamp,
}

impl From<BeatRow> for Beat {
    fn from(row: BeatRow) -> Self {
        Beat {
            num: row.idx,
            label: row.label,
            summary: row.summary,
            purpose: row.purpose,
            stakes: row.stakes,
            extra: Default::default(),
        }
    }
}

/// DTO for inserting a beat.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBeat {
    pub idx: Option<i32>,
    pub label: Option<String>,
    pub summary: Option<String>,
    pub purpose: Option<String>,
    pub stakes: Option<String>,
}

impl NewBeat {
    /// Build an insert row, or `None` if the beat has neither label nor summary.
    pub fn from_beat(beat: Beat) -> Option<Self> {
        if !beat.is_storable() {
            return None;
        }
        Some(Self {
            idx: beat.num,
            label: blank_to_none(beat.label),
            summary: blank_to_none(beat.summary),
            purpose: blank_to_none(beat.purpose),
            stakes: blank_to_none(beat.stakes),
        })
    }
}
