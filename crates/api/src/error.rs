use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use moqqins_core::error::CoreError;

use crate::response::ErrorBody;

/// Message sent in place of internal error details outside development.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `moqqins_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// The unredacted body of an internal error, attached to the response as an
/// extension. The error-detail middleware swaps it in when running in
/// development.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub ErrorBody);

impl AppError {
    /// Shorthand for a missing entity.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        AppError::Core(CoreError::NotFound {
            entity,
            id: id.into(),
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} not found"),
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Validation failed".to_string(),
                    msg.clone(),
                ),
                CoreError::Conflict(msg) => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "Conflict".to_string(),
                    msg.clone(),
                ),
            },

            // --- Database errors ---
            AppError::Database(err) => match classify_sqlx_error(err) {
                Some(classified) => classified,
                None => return internal_error_response(&err.to_string()),
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                "Bad request".to_string(),
                msg.clone(),
            ),
            AppError::InternalError(msg) => return internal_error_response(msg),
        };

        let body = ErrorBody {
            error,
            message,
            code,
        };
        (status, axum::Json(body)).into_response()
    }
}

/// Build a redacted 500 response, logging the detail and attaching it as an
/// [`InternalErrorDetail`] extension.
fn internal_error_response(detail: &str) -> Response {
    tracing::error!(error = %detail, "Internal error");

    let body = |message: String| ErrorBody {
        error: REDACTED_MESSAGE.to_string(),
        message,
        code: "INTERNAL_ERROR",
    };

    let mut response = (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(body(REDACTED_MESSAGE.to_string())),
    )
        .into_response();
    response
        .extensions_mut()
        .insert(InternalErrorDetail(body(detail.to_string())));
    response
}

/// Classify the sqlx errors that map to client-facing statuses.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations map to 409.
///
/// Everything else returns `None` and is reported as an internal error.
fn classify_sqlx_error(err: &sqlx::Error) -> Option<(StatusCode, &'static str, String, String)> {
    match err {
        sqlx::Error::RowNotFound => Some((
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Not found".to_string(),
            "Resource not found".to_string(),
        )),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Some((
            StatusCode::CONFLICT,
            "CONFLICT",
            "Conflict".to_string(),
            format!("Duplicate value violates unique constraint: {}", db_err.message()),
        )),
        _ => None,
    }
}

/// Whether a sqlx error is a unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
