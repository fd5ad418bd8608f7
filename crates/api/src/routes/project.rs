//! Route definitions for the `/projects` resource.
//!
//! Also nests project-scoped version routes under `/projects/{project_id}/versions`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{project, version};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
///
/// GET    /{project_id}/versions             -> list_by_project
/// POST   /{project_id}/versions             -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{project_id}/versions",
            get(version::list_by_project).post(version::create),
        )
}
