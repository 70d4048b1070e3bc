//! JSON shapes exchanged with the API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taskhive_core::types::{DbId, Timestamp};

/// A pad as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaskPad {
    pub task_pad_id: DbId,
    pub user_email: String,
    pub title: String,
    pub task_pad_order: i32,
    pub created_at: Timestamp,
}

/// A task as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
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

#[derive(Debug, Serialize)]
pub(crate) struct PadBody<'a> {
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<&'a str>,
    pub title: &'a str,
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTaskRequest {
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(rename = "taskPadId")]
    pub task_pad_id: DbId,
    #[serde(rename = "taskText")]
    pub task_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// Body of `PUT /api/tasks/{id}`. Unset fields are omitted and stay unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "taskText", skip_serializing_if = "Option::is_none")]
    pub task_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(rename = "taskPadId", skip_serializing_if = "Option::is_none")]
    pub task_pad_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}
