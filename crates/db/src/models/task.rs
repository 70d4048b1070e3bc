//! Task entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhive_core::types::{DbId, Timestamp};

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub task_id: DbId,
    pub task_pad_id: DbId,
    pub user_email: String,
    pub title: String,
    pub task_text: String,
    pub is_completed: bool,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub task_item_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a task.
///
/// Every field is optional at the wire level so the handler can answer
/// with a 400 naming the missing field instead of a generic rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTask {
    #[serde(rename = "userEmail", alias = "user_email")]
    pub user_email: Option<String>,
    #[serde(rename = "taskPadId", alias = "task_pad_id")]
    pub task_pad_id: Option<DbId>,
    #[serde(rename = "taskText", alias = "task_text")]
    pub task_text: Option<String>,
    pub title: Option<String>,
    #[serde(alias = "dueDate")]
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
    #[serde(alias = "taskItemOrder")]
    pub task_item_order: Option<i32>,
}

/// Fully resolved insert for the `tasks` table.
///
/// `task_item_order` of `None` appends the task after its pad's last task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub task_pad_id: DbId,
    pub user_email: String,
    pub title: String,
    pub task_text: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub task_item_order: Option<i32>,
}

/// DTO for a partial task update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    #[serde(rename = "taskText", alias = "task_text")]
    pub task_text: Option<String>,
    #[serde(alias = "isCompleted")]
    pub is_completed: Option<bool>,
    #[serde(rename = "taskPadId", alias = "task_pad_id")]
    pub task_pad_id: Option<DbId>,
    #[serde(alias = "dueDate")]
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
}
