//! Task pad entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskhive_core::types::{DbId, Timestamp};

/// A row from the `task_pads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskPad {
    pub task_pad_id: DbId,
    pub user_email: String,
    pub title: String,
    pub task_pad_order: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a new pad.
///
/// `user_email` is optional: the owner always comes from the verified
/// session, and a supplied value must match it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskPad {
    #[serde(rename = "userEmail", alias = "user_email")]
    pub user_email: Option<String>,
    pub title: String,
}

/// DTO for updating a pad. Only the title is mutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskPad {
    pub title: Option<String>,
}
