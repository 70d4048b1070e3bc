//! Handlers for the `/taskpads` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use taskhive_core::error::CoreError;
use taskhive_core::identity::normalize_email;
use taskhive_core::task::validate_title;
use taskhive_core::types::DbId;
use taskhive_db::models::task_pad::{CreateTaskPad, TaskPad, UpdateTaskPad};
use taskhive_db::repositories::TaskPadRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/taskpads/{userEmail}
///
/// Lists the owner's pads by ascending `task_pad_order`.
pub async fn list_by_user(
    user: AuthUser,
    State(state): State<AppState>,
    Path(user_email): Path<String>,
) -> AppResult<Json<Vec<TaskPad>>> {
    let owner = normalize_email(&user_email)?;
    user.ensure_owner(&owner)?;

    let pads = TaskPadRepo::list_by_user(&state.pool, &owner).await?;
    Ok(Json(pads))
}

/// POST /api/taskpads
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTaskPad>,
) -> AppResult<(StatusCode, Json<TaskPad>)> {
    if let Some(claimed) = &input.user_email {
        user.ensure_owner(claimed)?;
    }
    validate_title(&input.title)?;

    let pad = TaskPadRepo::create(&state.pool, &user.email, &input.title).await?;

    tracing::info!(
        task_pad_id = pad.task_pad_id,
        task_pad_order = pad.task_pad_order,
        owner = %user.email,
        "Task pad created",
    );
    Ok((StatusCode::CREATED, Json(pad)))
}

/// PUT /api/taskpads/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskPad>,
) -> AppResult<Json<TaskPad>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }

    let pad = TaskPadRepo::update(&state.pool, id, &user.email, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TaskPad",
            id,
        }))?;
    Ok(Json(pad))
}

/// DELETE /api/taskpads/{id}
///
/// Removes the pad and every task in it.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TaskPadRepo::delete(&state.pool, id, &user.email).await?;
    if deleted {
        tracing::info!(task_pad_id = id, owner = %user.email, "Task pad deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "TaskPad",
            id,
        }))
    }
}
