//! Development-only middleware exposing internal error details.
//!
//! [`AppError`](crate::error::AppError) always renders 500s with a redacted
//! message and stashes the real body in an [`InternalErrorDetail`] response
//! extension. When mounted, this middleware replaces the redacted body with
//! the stashed one.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::InternalErrorDetail;

pub async fn expose_error_details(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<InternalErrorDetail>() {
        Some(InternalErrorDetail(body)) => (response.status(), Json(body)).into_response(),
        None => response,
    }
}
