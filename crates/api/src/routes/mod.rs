pub mod assist;
pub mod health;
pub mod project;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /tasks                 list (filtered, paginated), create
/// /tasks/{id}            get (full detail), update, delete
///
/// /projects              list (paginated), create
/// /projects/{id}         get (with stats), update, delete
///
/// /ai/suggestions        assist gateway (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tasks", task::router())
        .nest("/projects", project::router())
        .nest("/ai", assist::router())
}
