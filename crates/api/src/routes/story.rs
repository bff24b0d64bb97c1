//! Route definitions for the project aggregate (`save-*` / `get-*`).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{beats, characters, project};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/save-logline", post(project::save_logline))
        .route("/save-ingredients", post(project::save_ingredients))
        .route("/get-project", get(project::get_project))
        .route("/get-motifs", get(project::get_motifs))
        .route("/save-characters", post(characters::save_characters))
        .route("/get-characters", get(characters::get_characters))
        .route("/save-beats", post(beats::save_beats))
        .route("/get-beats", get(beats::get_beats))
}
