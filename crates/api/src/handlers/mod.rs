//! Request handlers, grouped by the resource or stage they serve.

pub mod beats;
pub mod characters;
pub mod coach;
pub mod project;
pub mod refine;

use serde::Deserialize;

/// `?id=` query string shared by the `get-*` endpoints.
///
/// Kept as a raw string so a missing or malformed id yields a 400 with a
/// readable message instead of the extractor's rejection.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}
