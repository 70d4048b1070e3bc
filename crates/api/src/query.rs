//! Query parameter types for API handlers.

use serde::Deserialize;
use taskhive_core::types::DbId;

/// Optional pad filter for task listing (`?taskPadId=`).
#[derive(Debug, Default, Deserialize)]
pub struct TaskListParams {
    #[serde(rename = "taskPadId", alias = "task_pad_id")]
    pub task_pad_id: Option<DbId>,
}
