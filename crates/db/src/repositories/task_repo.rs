//! Repository for the `tasks` table.

use sqlx::{PgConnection, PgPool};
use taskhive_core::ordering::next_order;
use taskhive_core::types::DbId;

use crate::models::task::{NewTask, Task, UpdateTask};
use crate::repositories::TaskPadRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "task_id, task_pad_id, user_email, title, task_text, is_completed, \
    due_date, priority, task_item_order, created_at, updated_at";

/// Outcome of [`TaskRepo::update`].
#[derive(Debug)]
pub enum TaskUpdate {
    Updated(Task),
    /// The owner has no task with the given ID.
    TaskNotFound,
    /// The task exists but the requested target pad does not.
    PadNotFound,
}

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// List an owner's tasks by ascending `task_item_order`, optionally
    /// restricted to a single pad.
    pub async fn list_by_user(
        pool: &PgPool,
        owner: &str,
        task_pad_id: Option<DbId>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks \
             WHERE user_email = $1 AND ($2::BIGINT IS NULL OR task_pad_id = $2) \
             ORDER BY task_item_order, task_id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(owner)
            .bind(task_pad_id)
            .fetch_all(pool)
            .await
    }

    /// Find a task by ID if it belongs to `owner`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner: &str,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE task_id = $1 AND user_email = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// Insert a task into one of the owner's pads.
    ///
    /// The parent pad row is locked for the duration of the transaction so
    /// the computed `task_item_order` cannot collide with a concurrent insert.
    /// Returns `None` if the owner has no pad with `input.task_pad_id`.
    pub async fn create(pool: &PgPool, input: &NewTask) -> Result<Option<Task>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !TaskPadRepo::lock_owned(&mut *tx, input.task_pad_id, &input.user_email).await? {
            return Ok(None);
        }

        let order = match input.task_item_order {
            Some(order) => order,
            None => next_order(Self::max_order(&mut *tx, input.task_pad_id).await?),
        };

        let query = format!(
            "INSERT INTO tasks \
                (task_pad_id, user_email, title, task_text, due_date, priority, task_item_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(input.task_pad_id)
            .bind(&input.user_email)
            .bind(&input.title)
            .bind(&input.task_text)
            .bind(input.due_date)
            .bind(&input.priority)
            .bind(order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(task))
    }

    /// Apply a partial update. Only non-`None` fields in `input` change;
    /// `updated_at` is always refreshed.
    ///
    /// Moving a task to a different pad appends it after the target pad's
    /// last task.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner: &str,
        input: &UpdateTask,
    ) -> Result<TaskUpdate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current_pad: Option<DbId> = sqlx::query_scalar(
            "SELECT task_pad_id FROM tasks WHERE task_id = $1 AND user_email = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current_pad) = current_pad else {
            return Ok(TaskUpdate::TaskNotFound);
        };

        let mut moved_order = None;
        if let Some(target) = input.task_pad_id.filter(|target| *target != current_pad) {
            if !TaskPadRepo::lock_owned(&mut *tx, target, owner).await? {
                return Ok(TaskUpdate::PadNotFound);
            }
            moved_order = Some(next_order(Self::max_order(&mut *tx, target).await?));
        }

        let query = format!(
            "UPDATE tasks SET \
                title = COALESCE($3, title), \
                task_text = COALESCE($4, task_text), \
                is_completed = COALESCE($5, is_completed), \
                task_pad_id = COALESCE($6, task_pad_id), \
                due_date = COALESCE($7, due_date), \
                priority = COALESCE($8, priority), \
                task_item_order = COALESCE($9, task_item_order), \
                updated_at = NOW() \
             WHERE task_id = $1 AND user_email = $2 \
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(owner)
            .bind(&input.title)
            .bind(&input.task_text)
            .bind(input.is_completed)
            .bind(input.task_pad_id)
            .bind(input.due_date)
            .bind(&input.priority)
            .bind(moved_order)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(TaskUpdate::Updated(task))
    }

    /// Hard-delete a task. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, owner: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = $1 AND user_email = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn max_order(
        conn: &mut PgConnection,
        task_pad_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT MAX(task_item_order) FROM tasks WHERE task_pad_id = $1")
            .bind(task_pad_id)
            .fetch_one(conn)
            .await
    }
}
