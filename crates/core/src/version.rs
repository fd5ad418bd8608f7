//! Version-level domain rules and request defaults.

use crate::types::{new_id, DbId};

/// Prefix of every generated version id.
pub const VERSION_ID_PREFIX: &str = "ver";

/// Message recorded when a client creates a version without one.
pub const DEFAULT_VERSION_MESSAGE: &str = "Version created via Moqqins";

/// Author recorded when a client creates a version without one.
pub const DEFAULT_VERSION_AUTHOR: &str = "Unknown User";

/// Generate a fresh version id (`ver_<hex>`).
pub fn new_version_id() -> DbId {
    new_id(VERSION_ID_PREFIX)
}

/// Version message, falling back to [`DEFAULT_VERSION_MESSAGE`] when absent or empty.
pub fn message_or_default(message: Option<String>) -> String {
    non_empty_or(message, DEFAULT_VERSION_MESSAGE)
}

/// Version author, falling back to [`DEFAULT_VERSION_AUTHOR`] when absent or empty.
pub fn author_or_default(author: Option<String>) -> String {
    non_empty_or(author, DEFAULT_VERSION_AUTHOR)
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
