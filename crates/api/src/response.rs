//! Shared response body types for API handlers.

use serde::Serialize;

/// JSON body of every error response: `{ "error", "message", "code" }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Short error title.
    pub error: String,
    /// Human-readable detail.
    pub message: String,
    /// Stable machine-readable code.
    pub code: &'static str,
}
