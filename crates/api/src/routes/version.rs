//! Route definitions for the `/versions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::version;
use crate::state::AppState;

/// Routes mounted at `/versions`.
///
/// ```text
/// GET    /{id}                              -> get_by_id
/// DELETE /{id}                              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(version::get_by_id).delete(version::delete))
}
