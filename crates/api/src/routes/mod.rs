pub mod health;
pub mod project;
pub mod version;

use axum::routing::get;
use axum::Router;

use crate::handlers::meta;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                                API metadata + endpoint listing
/// /test                                            connectivity echo
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{project_id}/versions                  list, create
///
/// /versions/{id}                                   get, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(meta::api_index))
        .route("/test", get(meta::connectivity_test))
        // Projects and their project-scoped versions.
        .nest("/projects", project::router())
        // Versions addressed directly by id.
        .nest("/versions", version::router())
}
