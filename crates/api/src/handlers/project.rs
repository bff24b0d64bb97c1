//! Handlers for the project row: logline, ingredients and motifs.

use axum::extract::{Query, State};
use axum::Json;
use screenplay_core::error::CoreError;
use screenplay_core::ingredients::MotifEntry;
use screenplay_core::lenient;
use screenplay_core::types::ProjectId;
use screenplay_core::validation::{blank_to_none, non_blank, parse_project_id, require_text};
use screenplay_db::models::motif::NewMotif;
use screenplay_db::models::project::{IngredientFields, LoglineFields, Project};
use screenplay_db::repositories::{MotifRepo, ProjectRepo};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::IdQuery;
use crate::state::AppState;

fn project_not_found(id: ProjectId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id: id.to_string(),
    })
}

/// Parse an optional `projectId` body field: absent or blank means "create".
fn optional_project_id(raw: Option<&str>) -> AppResult<Option<ProjectId>> {
    match non_blank(raw) {
        Some(id) => Ok(Some(parse_project_id("projectId", Some(id))?)),
        None => Ok(None),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveLoglineRequest {
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
    pub title: Option<String>,
    pub logline: Option<String>,
    pub genre: Option<String>,
    pub tone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project: Project,
}

/// POST /api/save-logline
///
/// Updates the project when `projectId` is given, otherwise inserts one.
pub async fn save_logline(
    State(state): State<AppState>,
    Json(input): Json<SaveLoglineRequest>,
) -> AppResult<Json<ProjectResponse>> {
    let logline = require_text("logline", input.logline.as_deref())?.to_string();
    let project_id = optional_project_id(input.project_id.as_deref())?;

    let fields = LoglineFields {
        title: blank_to_none(input.title),
        logline,
        genre: input.genre,
        tone: input.tone,
    };

    let project = match project_id {
        Some(id) => ProjectRepo::update_logline(&state.pool, id, &fields)
            .await?
            .ok_or_else(|| project_not_found(id))?,
        None => ProjectRepo::create_with_logline(&state.pool, &fields).await?,
    };

    tracing::info!(project_id = %project.id, "Logline saved");
    Ok(Json(ProjectResponse { project }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveIngredientsRequest {
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
    pub theme_equation: Option<String>,
    pub world_brief: Option<String>,
    /// Replaces the project's motifs when an array; left alone otherwise.
    pub motifs: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct SaveIngredientsResponse {
    #[serde(rename = "projectId")]
    pub project_id: ProjectId,
    pub ok: bool,
}

/// POST /api/save-ingredients
pub async fn save_ingredients(
    State(state): State<AppState>,
    Json(input): Json<SaveIngredientsRequest>,
) -> AppResult<Json<SaveIngredientsResponse>> {
    let theme = require_text("theme_equation", input.theme_equation.as_deref())?.to_string();
    let project_id = optional_project_id(input.project_id.as_deref())?;

    let motifs = input
        .motifs
        .filter(Value::is_array)
        .map(|value| {
            lenient::items_from_value::<MotifEntry>(value)
                .into_iter()
                .filter_map(NewMotif::from_entry)
                .collect::<Vec<_>>()
        });
    let motif_count = motifs.as_ref().map(Vec::len);

    let fields = IngredientFields {
        theme,
        world_brief: input.world_brief,
        motifs,
    };

    let project = match project_id {
        Some(id) => ProjectRepo::update_ingredients(&state.pool, id, &fields)
            .await?
            .ok_or_else(|| project_not_found(id))?,
        None => ProjectRepo::create_with_ingredients(&state.pool, &fields).await?,
    };

    tracing::info!(project_id = %project.id, motifs = ?motif_count, "Ingredients saved");
    Ok(Json(SaveIngredientsResponse {
        project_id: project.id,
        ok: true,
    }))
}

/// GET /api/get-project?id=
pub async fn get_project(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ProjectResponse>> {
    let id = parse_project_id("id", query.id.as_deref())?;
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(ProjectResponse { project }))
}

#[derive(Debug, Serialize)]
pub struct MotifsResponse {
    pub motifs: Vec<MotifEntry>,
}

/// GET /api/get-motifs?id=
pub async fn get_motifs(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<MotifsResponse>> {
    let id = parse_project_id("id", query.id.as_deref())?;
    let motifs = MotifRepo::list_by_project(&state.pool, id)
        .await?
        .into_iter()
        .map(MotifEntry::from)
        .collect();
    Ok(Json(MotifsResponse { motifs }))
}
