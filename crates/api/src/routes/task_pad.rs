//! Route definitions for the `/taskpads` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::task_pad;
use crate::state::AppState;

/// Routes mounted at `/taskpads`.
///
/// The single path segment is an owner email for `GET` and a pad id for
/// `PUT`/`DELETE`.
///
/// ```text
/// POST   /                -> create
/// GET    /{key}           -> list_by_user
/// PUT    /{key}           -> update
/// DELETE /{key}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(task_pad::create)).route(
        "/{key}",
        get(task_pad::list_by_user)
            .put(task_pad::update)
            .delete(task_pad::delete),
    )
}
