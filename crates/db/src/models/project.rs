//! Project entity model and DTOs.

use screenplay_core::types::{ProjectId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::motif::NewMotif;

/// Title given to projects created without one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub logline: Option<String>,
    pub genre: Option<String>,
    pub tone: Option<String>,
    /// Theme equation from the Ingredients stage.
    pub theme: Option<String>,
    pub world_brief: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields written by the Logline stage. `title` falls back to
/// [`DEFAULT_TITLE`]; `genre` and `tone` are overwritten even when `None`.
#[derive(Debug, Clone)]
pub struct LoglineFields {
    pub title: Option<String>,
    pub logline: String,
    pub genre: Option<String>,
    pub tone: Option<String>,
}

/// Fields written by the Ingredients stage.
#[derive(Debug, Clone)]
pub struct IngredientFields {
    pub theme: String,
    pub world_brief: Option<String>,
    /// Replaces the project's motifs in the same transaction when `Some`.
    pub motifs: Option<Vec<NewMotif>>,
}
