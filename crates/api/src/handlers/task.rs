//! Handlers for the `/tasks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use taskhive_core::error::CoreError;
use taskhive_core::identity::normalize_email;
use taskhive_core::ordering::validate_explicit_order;
use taskhive_core::task::{title_from_text, validate_priority, validate_task_text, validate_title};
use taskhive_core::types::DbId;
use taskhive_db::models::task::{CreateTask, NewTask, Task, UpdateTask};
use taskhive_db::repositories::{TaskRepo, TaskUpdate};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::TaskListParams;
use crate::state::AppState;

/// Resolve a create request into a validated insert owned by `user`.
///
/// `title` and `taskText` stand in for each other when only one is sent.
fn resolve_new_task(user: &AuthUser, input: CreateTask) -> AppResult<NewTask> {
    if let Some(claimed) = &input.user_email {
        user.ensure_owner(claimed)?;
    }

    let task_pad_id = input.task_pad_id.ok_or_else(|| {
        AppError::BadRequest("taskPadId is required to create a task".into())
    })?;

    let (title, task_text) = match (input.title, input.task_text) {
        (Some(title), Some(text)) => (title, text),
        (None, Some(text)) => (title_from_text(&text), text),
        (Some(title), None) => (title.clone(), title),
        (None, None) => {
            return Err(AppError::BadRequest(
                "taskText is required to create a task".into(),
            ))
        }
    };
    validate_title(&title)?;
    validate_task_text(&task_text)?;

    if let Some(priority) = &input.priority {
        validate_priority(priority)?;
    }
    if let Some(order) = input.task_item_order {
        validate_explicit_order(order)?;
    }

    Ok(NewTask {
        task_pad_id,
        user_email: user.email.clone(),
        title,
        task_text,
        due_date: input.due_date,
        priority: input.priority,
        task_item_order: input.task_item_order,
    })
}

fn validate_update(input: &UpdateTask) -> AppResult<()> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(text) = &input.task_text {
        validate_task_text(text)?;
    }
    if let Some(priority) = &input.priority {
        validate_priority(priority)?;
    }
    Ok(())
}

/// GET /api/tasks/{userEmail}?taskPadId=
///
/// Lists the owner's tasks by ascending `task_item_order`, optionally
/// limited to one pad.
pub async fn list_by_user(
    user: AuthUser,
    State(state): State<AppState>,
    Path(user_email): Path<String>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<Vec<Task>>> {
    let owner = normalize_email(&user_email)?;
    user.ensure_owner(&owner)?;

    let tasks = TaskRepo::list_by_user(&state.pool, &owner, params.task_pad_id).await?;
    Ok(Json(tasks))
}

/// POST /api/tasks
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let new_task = resolve_new_task(&user, input)?;

    let task = TaskRepo::create(&state.pool, &new_task)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TaskPad",
            id: new_task.task_pad_id,
        }))?;

    tracing::info!(
        task_id = task.task_id,
        task_pad_id = task.task_pad_id,
        task_item_order = task.task_item_order,
        "Task created",
    );
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id}
///
/// Partial update: only fields present in the body change.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    validate_update(&input)?;

    match TaskRepo::update(&state.pool, id, &user.email, &input).await? {
        TaskUpdate::Updated(task) => {
            tracing::debug!(
                task_id = task.task_id,
                is_completed = task.is_completed,
                "Task updated"
            );
            Ok(Json(task))
        }
        TaskUpdate::TaskNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id,
        })),
        TaskUpdate::PadNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "TaskPad",
            id: input.task_pad_id.unwrap_or_default(),
        })),
    }
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, id, &user.email).await?;
    if deleted {
        tracing::info!(task_id = id, "Task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}
