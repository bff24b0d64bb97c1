pub mod health;
pub mod stages;
pub mod story;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Endpoint names are kept flat (`refine-*`, `save-*`, `get-*`) because the
/// client tabs call them by these paths.
///
/// ```text
/// POST /refine-logline                 plain-text loglines
/// POST /refine-ingredients             theme, world, obligations, motifs
/// POST /refine-characters              cast list
/// POST /refine-beats                   40-beat spine (bounded repair)
/// POST /validate-beat                  beat coach: scores + rewrite
/// POST /scene-expectations             scene coach: checklist
///
/// POST /save-logline                   insert or update project logline
/// POST /save-ingredients               theme + world, replace motifs
/// POST /save-characters                replace cast
/// POST /save-beats                     replace beats
/// GET  /get-project?id=                project row
/// GET  /get-characters?id=             cast
/// GET  /get-beats?id=                  beats by ordinal
/// GET  /get-motifs?id=                 motifs
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(stages::router())
        .merge(story::router())
}
