//! Beat coaching: per-beat evaluation and scene expectations.

use axum::extract::State;
use axum::Json;
use screenplay_core::coaching::{BeatDraft, BeatEvaluation, SceneExpectations};
use screenplay_core::prompts;
use screenplay_core::stage::Task;
use screenplay_llm::structured::complete_json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// A beat plus the spine (logline and theme) it is judged against.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CoachRequest {
    pub logline: Option<String>,
    pub theme: Option<String>,
    pub beat: BeatDraft,
}

/// POST /api/validate-beat
pub async fn validate_beat(
    State(state): State<AppState>,
    Json(input): Json<CoachRequest>,
) -> AppResult<Json<BeatEvaluation>> {
    let llm = state.llm()?;
    let prompt = prompts::validate_beat(
        input.logline.as_deref(),
        input.theme.as_deref(),
        &input.beat,
    );
    let evaluation: BeatEvaluation =
        complete_json(llm, Task::ValidateBeat, &prompt, state.model()).await?;
    tracing::debug!(overall = ?evaluation.score.overall(), "Beat evaluated");
    Ok(Json(evaluation))
}

/// POST /api/scene-expectations
pub async fn scene_expectations(
    State(state): State<AppState>,
    Json(input): Json<CoachRequest>,
) -> AppResult<Json<SceneExpectations>> {
    let llm = state.llm()?;
    let prompt =
        prompts::scene_expectations(input.logline.as_deref(), input.theme.as_deref(), &input.beat);
    let expectations = complete_json(llm, Task::SceneExpectations, &prompt, state.model()).await?;
    Ok(Json(expectations))
}
