//! Request-shape checks shared by the persistence endpoints.

use crate::error::CoreError;
use crate::types::ProjectId;

/// Treat `None`, empty and whitespace-only strings alike as "absent".
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Owned variant of [`non_blank`] for DTO fields headed to the database.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Require a non-blank text field, returning it on success.
///
/// The error message matches what clients already display: `Missing <field>`.
pub fn require_text<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    non_blank(value).ok_or_else(|| CoreError::Validation(format!("Missing {field}")))
}

/// Parse a project identifier supplied as a string (query or body field).
pub fn parse_project_id(field: &str, value: Option<&str>) -> Result<ProjectId, CoreError> {
    let raw = require_text(field, value)?;
    ProjectId::parse_str(raw.trim())
        .map_err(|_| CoreError::Validation(format!("Invalid {field}: {raw}")))
}
