/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable; the pool is reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, created once at startup and closed on shutdown.
    pub pool: moqqins_db::DbPool,
}
