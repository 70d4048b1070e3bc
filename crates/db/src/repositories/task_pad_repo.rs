//! Repository for the `task_pads` table.

use sqlx::{PgConnection, PgPool};
use taskhive_core::ordering::next_order;
use taskhive_core::types::DbId;

use crate::models::task_pad::{TaskPad, UpdateTaskPad};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "task_pad_id, user_email, title, task_pad_order, created_at";

/// Provides CRUD operations for task pads.
pub struct TaskPadRepo;

impl TaskPadRepo {
    /// List an owner's pads by ascending `task_pad_order`.
    pub async fn list_by_user(pool: &PgPool, owner: &str) -> Result<Vec<TaskPad>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_pads \
             WHERE user_email = $1 \
             ORDER BY task_pad_order, task_pad_id"
        );
        sqlx::query_as::<_, TaskPad>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// Find a pad by ID if it belongs to `owner`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner: &str,
    ) -> Result<Option<TaskPad>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM task_pads WHERE task_pad_id = $1 AND user_email = $2");
        sqlx::query_as::<_, TaskPad>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new pad at the end of the owner's list.
    ///
    /// The owner's pads are serialized through a transaction-scoped advisory
    /// lock, so concurrent creates observe each other's `MAX(task_pad_order)`.
    pub async fn create(pool: &PgPool, owner: &str, title: &str) -> Result<TaskPad, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext('task_pads:' || $1))")
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        let current_max: Option<i32> =
            sqlx::query_scalar("SELECT MAX(task_pad_order) FROM task_pads WHERE user_email = $1")
                .bind(owner)
                .fetch_one(&mut *tx)
                .await?;

        let query = format!(
            "INSERT INTO task_pads (user_email, title, task_pad_order) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let pad = sqlx::query_as::<_, TaskPad>(&query)
            .bind(owner)
            .bind(title)
            .bind(next_order(current_max))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(pad)
    }

    /// Update a pad's title. Returns `None` if the owner has no such pad.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner: &str,
        input: &UpdateTaskPad,
    ) -> Result<Option<TaskPad>, sqlx::Error> {
        let query = format!(
            "UPDATE task_pads SET title = COALESCE($3, title) \
             WHERE task_pad_id = $1 AND user_email = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskPad>(&query)
            .bind(id)
            .bind(owner)
            .bind(&input.title)
            .fetch_optional(pool)
            .await
    }

    /// Delete a pad together with all of its tasks in one transaction.
    ///
    /// Returns `true` if the pad existed and was removed.
    pub async fn delete(pool: &PgPool, id: DbId, owner: &str) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !Self::lock_owned(&mut *tx, id, owner).await? {
            return Ok(false);
        }

        let tasks = sqlx::query("DELETE FROM tasks WHERE task_pad_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let pads = sqlx::query("DELETE FROM task_pads WHERE task_pad_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            task_pad_id = id,
            tasks_removed = tasks.rows_affected(),
            "Deleted task pad"
        );
        Ok(pads.rows_affected() > 0)
    }

    /// Lock a pad row for the rest of the transaction.
    ///
    /// Returns `false` if the owner has no pad with this ID.
    pub(crate) async fn lock_owned(
        conn: &mut PgConnection,
        id: DbId,
        owner: &str,
    ) -> Result<bool, sqlx::Error> {
        let locked: Option<DbId> = sqlx::query_scalar(
            "SELECT task_pad_id FROM task_pads \
             WHERE task_pad_id = $1 AND user_email = $2 \
             FOR UPDATE",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(conn)
        .await?;
        Ok(locked.is_some())
    }
}
