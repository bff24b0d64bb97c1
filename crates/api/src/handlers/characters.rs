//! Handlers for a project's cast.

use axum::extract::{Query, State};
use axum::Json;
use screenplay_core::character::CharacterSheet;
use screenplay_core::error::CoreError;
use screenplay_core::lenient;
use screenplay_core::validation::parse_project_id;
use screenplay_db::models::character::NewCharacter;
use screenplay_db::repositories::{CharacterRepo, ProjectRepo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::IdQuery;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveCharactersRequest {
    #[serde(rename = "projectId", deserialize_with = "lenient::text")]
    pub project_id: Option<String>,
    /// Kept raw so a non-array value is a 400 rather than a rejected body.
    pub characters: Option<Value>,
}

/// Acknowledgement for the replace endpoints.
#[derive(Debug, Serialize)]
pub struct SaveCountResponse {
    pub ok: bool,
    /// Rows actually stored after filtering.
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct CharactersResponse {
    pub characters: Vec<CharacterSheet>,
}

/// POST /api/save-characters
///
/// Replaces the whole cast. Characters without a name or a want are dropped.
pub async fn save_characters(
    State(state): State<AppState>,
    Json(input): Json<SaveCharactersRequest>,
) -> AppResult<Json<SaveCountResponse>> {
    let project_id = parse_project_id("projectId", input.project_id.as_deref())?;
    let characters: Vec<CharacterSheet> = match input.characters {
        Some(value) if value.is_array() => lenient::items_from_value(value),
        _ => return Err(AppError::BadRequest("characters must be an array".to_string())),
    };

    if !ProjectRepo::exists(&state.pool, project_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id.to_string(),
        }));
    }

    let submitted = characters.len();
    let rows: Vec<NewCharacter> = characters
        .into_iter()
        .filter_map(NewCharacter::from_sheet)
        .collect();
    let count = CharacterRepo::replace_for_project(&state.pool, project_id, &rows).await?;

    tracing::info!(%project_id, submitted, count, "Characters saved");
    Ok(Json(SaveCountResponse { ok: true, count }))
}

/// GET /api/get-characters?id=
pub async fn get_characters(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<CharactersResponse>> {
    let id = parse_project_id("id", query.id.as_deref())?;
    let characters = CharacterRepo::list_by_project(&state.pool, id)
        .await?
        .into_iter()
        .map(|c| c.into_sheet())
        .collect();
    Ok(Json(CharactersResponse { characters }))
}
