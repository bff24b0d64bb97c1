//! Handlers for the `refine-*` stage endpoints.
//!
//! Each handler builds the stage prompt from the request fields, makes one
//! completion call (beats may make up to three) and returns the parsed
//! document. Nothing is persisted here; the client saves explicitly.

use axum::extract::State;
use axum::Json;
use screenplay_core::beat::BeatSheet;
use screenplay_core::character::Cast;
use screenplay_core::ingredients::Ingredients;
use screenplay_core::prompts;
use screenplay_core::stage::Task;
use screenplay_llm::beats::generate_beat_sheet;
use screenplay_llm::structured::{complete_json, complete_text};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefineLoglineRequest {
    pub idea: Option<String>,
    pub genre: Option<String>,
    pub tone: Option<String>,
}

/// Free-text loglines plus viability notes.
#[derive(Debug, Serialize)]
pub struct RefineLoglineResponse {
    pub result: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RefineIngredientsRequest {
    pub logline: Option<String>,
    pub genre: Option<String>,
    pub tone: Option<String>,
}

/// Body shared by the characters and beats stages.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SpineRequest {
    pub logline: Option<String>,
    pub theme: Option<String>,
    pub world: Option<String>,
}

/// POST /api/refine-logline
pub async fn refine_logline(
    State(state): State<AppState>,
    Json(input): Json<RefineLoglineRequest>,
) -> AppResult<Json<RefineLoglineResponse>> {
    let llm = state.llm()?;
    let prompt = prompts::refine_logline(
        input.idea.as_deref(),
        input.genre.as_deref(),
        input.tone.as_deref(),
    );
    let result = complete_text(llm, Task::RefineLogline, &prompt, state.model()).await?;
    Ok(Json(RefineLoglineResponse { result }))
}

/// POST /api/refine-ingredients
pub async fn refine_ingredients(
    State(state): State<AppState>,
    Json(input): Json<RefineIngredientsRequest>,
) -> AppResult<Json<Ingredients>> {
    let llm = state.llm()?;
    let prompt = prompts::refine_ingredients(
        input.logline.as_deref(),
        input.genre.as_deref(),
        input.tone.as_deref(),
    );
    let ingredients = complete_json(llm, Task::RefineIngredients, &prompt, state.model()).await?;
    Ok(Json(ingredients))
}

/// POST /api/refine-characters
pub async fn refine_characters(
    State(state): State<AppState>,
    Json(input): Json<SpineRequest>,
) -> AppResult<Json<Cast>> {
    let llm = state.llm()?;
    let prompt = prompts::refine_characters(
        input.logline.as_deref(),
        input.theme.as_deref(),
        input.world.as_deref(),
    );
    let cast: Cast = complete_json(llm, Task::RefineCharacters, &prompt, state.model()).await?;
    tracing::info!(characters = cast.characters.len(), "Cast proposed");
    Ok(Json(cast))
}

/// POST /api/refine-beats
///
/// Answers 502 when the model still has the wrong number of beats after the
/// correction attempts.
pub async fn refine_beats(
    State(state): State<AppState>,
    Json(input): Json<SpineRequest>,
) -> AppResult<Json<BeatSheet>> {
    let llm = state.llm()?;
    let prompt = prompts::generate_beats(
        input.logline.as_deref(),
        input.theme.as_deref(),
        input.world.as_deref(),
    );
    let sheet = generate_beat_sheet(llm, &prompt, state.model()).await?;
    Ok(Json(sheet))
}
