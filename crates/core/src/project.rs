//! Project-level domain rules.

use crate::error::CoreError;
use crate::types::{new_id, DbId};

/// Prefix of every generated project id.
pub const PROJECT_ID_PREFIX: &str = "proj";

/// Generate a fresh project id (`proj_<hex>`).
pub fn new_project_id() -> DbId {
    new_id(PROJECT_ID_PREFIX)
}

/// Validate a project display name.
///
/// A name is required and must contain at least one non-whitespace character.
pub fn validate_project_name(name: Option<&str>) -> Result<&str, CoreError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        Some(_) => Err(CoreError::Validation(
            "Project name must not be empty".to_string(),
        )),
        None => Err(CoreError::Validation("Project name is required".to_string())),
    }
}
