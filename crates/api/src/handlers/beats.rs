//! Handlers for a project's saved beats.

use axum::extract::{Query, State};
use axum::Json;
use screenplay_core::beat::{Beat, BeatSheet};
use screenplay_core::error::CoreError;
use screenplay_core::lenient;
use screenplay_core::validation::parse_project_id;
use screenplay_db::models::beat::NewBeat;
use screenplay_db::repositories::{BeatRepo, ProjectRepo};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::characters::SaveCountResponse;
use crate::handlers::IdQuery;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveBeatsRequest {
    #[serde(rename = "projectId", deserialize_with = "lenient::text")]
    pub project_id: Option<String>,
    /// Kept raw so a non-array value is a 400 rather than a rejected body.
    pub beats: Option<Value>,
}

/// POST /api/save-beats
///
/// Replaces every beat of the project. Beats with neither label nor summary
/// are dropped; the count of a saved sheet need not be 40.
pub async fn save_beats(
    State(state): State<AppState>,
    Json(input): Json<SaveBeatsRequest>,
) -> AppResult<Json<SaveCountResponse>> {
    let project_id = parse_project_id("projectId", input.project_id.as_deref())?;
    let beats: Vec<Beat> = match input.beats {
        Some(value) if value.is_array() => lenient::items_from_value(value),
        _ => return Err(AppError::BadRequest("beats must be an array".to_string())),
    };

    if !ProjectRepo::exists(&state.pool, project_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id.to_string(),
        }));
    }

    let rows: Vec<NewBeat> = beats.into_iter().filter_map(NewBeat::from_beat).collect();
    let count = BeatRepo::replace_for_project(&state.pool, project_id, &rows).await?;

    tracing::info!(%project_id, count, "Beats saved");
    Ok(Json(SaveCountResponse { ok: true, count }))
}

/// GET /api/get-beats?id=
pub async fn get_beats(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<BeatSheet>> {
    let id = parse_project_id("id", query.id.as_deref())?;
    let beats = BeatRepo::list_by_project(&state.pool, id)
        .await?
        .into_iter()
        .map(Beat::from)
        .collect();
    Ok(Json(BeatSheet { beats }))
}
