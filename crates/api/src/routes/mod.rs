pub mod health;
pub mod task;
pub mod task_pad;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /taskpads                       create (POST)
/// /taskpads/{userEmail}           list an owner's pads (GET)
/// /taskpads/{id}                  update title (PUT), delete with tasks (DELETE)
///
/// /tasks                          create (POST)
/// /tasks/{userEmail}?taskPadId=   list an owner's tasks (GET)
/// /tasks/{id}                     partial update (PUT), delete (DELETE)
/// ```
///
/// Every route requires a session Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/taskpads", task_pad::router())
        .nest("/tasks", task::router())
}
