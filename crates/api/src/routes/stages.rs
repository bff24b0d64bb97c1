//! Route definitions for the LLM-backed stage endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::{coach, refine};
use crate::state::AppState;

/// Stage routes. Each is POST-only; other methods get 405 from the router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/refine-logline", post(refine::refine_logline))
        .route("/refine-ingredients", post(refine::refine_ingredients))
        .route("/refine-characters", post(refine::refine_characters))
        .route("/refine-beats", post(refine::refine_beats))
        .route("/validate-beat", post(coach::validate_beat))
        .route("/scene-expectations", post(coach::scene_expectations))
}
