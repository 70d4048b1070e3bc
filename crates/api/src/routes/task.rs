//! Route definitions for the `/tasks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// POST   /                -> create
/// GET    /{key}           -> list_by_user (key = owner email)
/// PUT    /{key}           -> update       (key = task id)
/// DELETE /{key}           -> delete       (key = task id)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(task::create)).route(
        "/{key}",
        get(task::list_by_user).put(task::update).delete(task::delete),
    )
}
