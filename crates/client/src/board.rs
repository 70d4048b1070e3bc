//! The signed-in user's board: pads in display order, each with its tasks.
//!
//! Mutations are sent to the API first. The board changes only when the
//! server confirms, using the row it returns, so the local view never
//! shows state the server rejected. Failures are logged and returned; the
//! board is left as it was.

use taskhive_core::types::DbId;

use crate::api::{ClientError, TaskHiveClient};
use crate::wire::{NewTaskRequest, Task, TaskPad, TaskPatch};

/// One pad and its tasks ordered by `task_item_order`.
#[derive(Debug, Clone, PartialEq)]
pub struct PadView {
    pub pad: TaskPad,
    pub tasks: Vec<Task>,
}

impl PadView {
    fn sort_tasks(&mut self) {
        self.tasks.sort_by_key(|t| (t.task_item_order, t.task_id));
    }
}

/// Pads ordered by `task_pad_order`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    owner: String,
    pads: Vec<PadView>,
}

impl Board {
    /// An empty board for `owner`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            pads: Vec::new(),
        }
    }

    /// Group flat pad and task listings into a board.
    ///
    /// Tasks whose pad is not in `pads` are dropped.
    pub fn from_rows(owner: impl Into<String>, pads: Vec<TaskPad>, tasks: Vec<Task>) -> Self {
        let mut board = Self::new(owner);
        for pad in pads {
            board.apply_pad_saved(pad);
        }
        for task in tasks {
            board.apply_task_saved(task);
        }
        board
    }

    /// Fetch the owner's pads and tasks from the API.
    pub async fn load(client: &TaskHiveClient, owner: &str) -> Result<Self, ClientError> {
        let pads = client.list_pads(owner).await?;
        let tasks = client.list_tasks(owner, None).await?;
        tracing::debug!(pads = pads.len(), tasks = tasks.len(), "Board loaded");
        Ok(Self::from_rows(owner, pads, tasks))
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn pads(&self) -> &[PadView] {
        &self.pads
    }

    pub fn pad(&self, id: DbId) -> Option<&PadView> {
        self.pads.iter().find(|p| p.pad.task_pad_id == id)
    }

    pub fn task(&self, id: DbId) -> Option<&Task> {
        self.pads
            .iter()
            .flat_map(|p| p.tasks.iter())
            .find(|t| t.task_id == id)
    }

    // ---- server-confirmed mutations ----

    /// Create a pad at the end of the board.
    pub async fn add_pad(
        &mut self,
        client: &TaskHiveClient,
        title: &str,
    ) -> Result<DbId, ClientError> {
        let pad = client
            .create_pad(&self.owner, title)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to create task pad"))?;
        let id = pad.task_pad_id;
        self.apply_pad_saved(pad);
        Ok(id)
    }

    /// Rename a pad.
    pub async fn rename_pad(
        &mut self,
        client: &TaskHiveClient,
        id: DbId,
        title: &str,
    ) -> Result<(), ClientError> {
        let pad = client.rename_pad(id, title).await.inspect_err(|e| {
            tracing::warn!(task_pad_id = id, error = %e, "Failed to rename task pad")
        })?;
        self.apply_pad_saved(pad);
        Ok(())
    }

    /// Delete a pad and, with it, its tasks.
    pub async fn remove_pad(
        &mut self,
        client: &TaskHiveClient,
        id: DbId,
    ) -> Result<(), ClientError> {
        client.delete_pad(id).await.inspect_err(|e| {
            tracing::warn!(task_pad_id = id, error = %e, "Failed to delete task pad")
        })?;
        self.apply_pad_deleted(id);
        Ok(())
    }

    /// Append a task to a pad. Blank text sends nothing and returns `None`.
    pub async fn add_task(
        &mut self,
        client: &TaskHiveClient,
        task_pad_id: DbId,
        text: &str,
    ) -> Result<Option<DbId>, ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let request = NewTaskRequest {
            user_email: Some(self.owner.clone()),
            task_pad_id,
            task_text: text.to_string(),
            title: Some(text.to_string()),
            ..Default::default()
        };
        let task = client
            .create_task(&request)
            .await
            .inspect_err(|e| tracing::warn!(task_pad_id, error = %e, "Failed to create task"))?;
        let id = task.task_id;
        self.apply_task_saved(task);
        Ok(Some(id))
    }

    /// Check or uncheck a task.
    pub async fn set_completed(
        &mut self,
        client: &TaskHiveClient,
        task_id: DbId,
        completed: bool,
    ) -> Result<(), ClientError> {
        let patch = TaskPatch {
            is_completed: Some(completed),
            ..Default::default()
        };
        self.patch_task(client, task_id, &patch).await
    }

    /// Commit an edited task text (on blur or Enter).
    ///
    /// Blank or unchanged text sends nothing and returns `false`.
    pub async fn edit_text(
        &mut self,
        client: &TaskHiveClient,
        task_id: DbId,
        text: &str,
    ) -> Result<bool, ClientError> {
        let text = text.trim();
        if text.is_empty() || self.task(task_id).is_some_and(|t| t.task_text == text) {
            return Ok(false);
        }

        let patch = TaskPatch {
            task_text: Some(text.to_string()),
            ..Default::default()
        };
        self.patch_task(client, task_id, &patch).await?;
        Ok(true)
    }

    /// Move a task to the end of another pad.
    pub async fn move_task(
        &mut self,
        client: &TaskHiveClient,
        task_id: DbId,
        target_pad_id: DbId,
    ) -> Result<(), ClientError> {
        let patch = TaskPatch {
            task_pad_id: Some(target_pad_id),
            ..Default::default()
        };
        self.patch_task(client, task_id, &patch).await
    }

    /// Delete a task.
    pub async fn remove_task(
        &mut self,
        client: &TaskHiveClient,
        task_id: DbId,
    ) -> Result<(), ClientError> {
        client
            .delete_task(task_id)
            .await
            .inspect_err(|e| tracing::warn!(task_id, error = %e, "Failed to delete task"))?;
        self.apply_task_deleted(task_id);
        Ok(())
    }

    async fn patch_task(
        &mut self,
        client: &TaskHiveClient,
        task_id: DbId,
        patch: &TaskPatch,
    ) -> Result<(), ClientError> {
        let task = client
            .update_task(task_id, patch)
            .await
            .inspect_err(|e| tracing::warn!(task_id, error = %e, "Failed to update task"))?;
        self.apply_task_saved(task);
        Ok(())
    }

    // ---- reconciliation ----

    /// Insert or replace a pad, keeping pad order.
    pub fn apply_pad_saved(&mut self, pad: TaskPad) {
        match self
            .pads
            .iter_mut()
            .find(|p| p.pad.task_pad_id == pad.task_pad_id)
        {
            Some(view) => view.pad = pad,
            None => self.pads.push(PadView {
                pad,
                tasks: Vec::new(),
            }),
        }
        self.pads.sort_by_key(|p| (p.pad.task_pad_order, p.pad.task_pad_id));
    }

    /// Drop a pad and its tasks.
    pub fn apply_pad_deleted(&mut self, id: DbId) {
        self.pads.retain(|p| p.pad.task_pad_id != id);
    }

    /// Insert or replace a task, moving it if its pad changed.
    ///
    /// Returns `false` if the task's pad is not on the board.
    pub fn apply_task_saved(&mut self, task: Task) -> bool {
        self.apply_task_deleted(task.task_id);

        match self
            .pads
            .iter_mut()
            .find(|p| p.pad.task_pad_id == task.task_pad_id)
        {
            Some(view) => {
                view.tasks.push(task);
                view.sort_tasks();
                true
            }
            None => false,
        }
    }

    /// Drop a task wherever it is.
    pub fn apply_task_deleted(&mut self, id: DbId) {
        for view in &mut self.pads {
            view.tasks.retain(|t| t.task_id != id);
        }
    }
}
