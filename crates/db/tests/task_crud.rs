//! Integration tests for the pad and task repositories.
//!
//! Exercises the repository layer against a real database:
//! - Order index assignment for pads and tasks
//! - Owner scoping of by-id operations
//! - Partial updates and pad moves
//! - Cascading pad deletion

use assert_matches::assert_matches;
use sqlx::PgPool;
use taskhive_db::models::task::{NewTask, UpdateTask};
use taskhive_db::models::task_pad::UpdateTaskPad;
use taskhive_db::repositories::{TaskPadRepo, TaskRepo, TaskUpdate};

const ADA: &str = "ada@example.com";
const BOB: &str = "bob@example.com";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_task(task_pad_id: i64, owner: &str, text: &str) -> NewTask {
    NewTask {
        task_pad_id,
        user_email: owner.to_string(),
        title: text.to_string(),
        task_text: text.to_string(),
        due_date: None,
        priority: None,
        task_item_order: None,
    }
}

// ---------------------------------------------------------------------------
// Task pads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sequential_pads_get_increasing_order(pool: PgPool) {
    for title in ["Groceries", "Work", "Garden"] {
        TaskPadRepo::create(&pool, ADA, title).await.unwrap();
    }

    let pads = TaskPadRepo::list_by_user(&pool, ADA).await.unwrap();
    let orders: Vec<i32> = pads.iter().map(|p| p.task_pad_order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert_eq!(pads[0].title, "Groceries");
    assert_eq!(pads[2].title, "Garden");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pad_order_is_per_owner(pool: PgPool) {
    TaskPadRepo::create(&pool, ADA, "A1").await.unwrap();
    TaskPadRepo::create(&pool, ADA, "A2").await.unwrap();
    let bob_pad = TaskPadRepo::create(&pool, BOB, "B1").await.unwrap();

    assert_eq!(bob_pad.task_pad_order, 1);
    assert!(TaskPadRepo::list_by_user(&pool, "nobody@example.com")
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_pad_creates_do_not_share_an_order(pool: PgPool) {
    let mut handles = Vec::new();
    for i in 0..8 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            TaskPadRepo::create(&pool, ADA, &format!("Pad {i}")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let pads = TaskPadRepo::list_by_user(&pool, ADA).await.unwrap();
    let orders: Vec<i32> = pads.iter().map(|p| p.task_pad_order).collect();
    assert_eq!(orders, (1..=8).collect::<Vec<_>>());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_pad_title_is_owner_scoped(pool: PgPool) {
    let pad = TaskPadRepo::create(&pool, ADA, "Old").await.unwrap();
    let input = UpdateTaskPad {
        title: Some("New".to_string()),
    };

    let foreign = TaskPadRepo::update(&pool, pad.task_pad_id, BOB, &input)
        .await
        .unwrap();
    assert!(foreign.is_none());

    let updated = TaskPadRepo::update(&pool, pad.task_pad_id, ADA, &input)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "New");
    assert_eq!(updated.task_pad_order, pad.task_pad_order);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_pad_removes_its_tasks(pool: PgPool) {
    let pad = TaskPadRepo::create(&pool, ADA, "Groceries").await.unwrap();
    let other = TaskPadRepo::create(&pool, ADA, "Work").await.unwrap();
    TaskRepo::create(&pool, &new_task(pad.task_pad_id, ADA, "Milk"))
        .await
        .unwrap();
    TaskRepo::create(&pool, &new_task(pad.task_pad_id, ADA, "Eggs"))
        .await
        .unwrap();
    TaskRepo::create(&pool, &new_task(other.task_pad_id, ADA, "Report"))
        .await
        .unwrap();

    assert!(TaskPadRepo::delete(&pool, pad.task_pad_id, ADA).await.unwrap());

    let remaining = TaskRepo::list_by_user(&pool, ADA, Some(pad.task_pad_id))
        .await
        .unwrap();
    assert!(remaining.is_empty());
    let untouched = TaskRepo::list_by_user(&pool, ADA, Some(other.task_pad_id))
        .await
        .unwrap();
    assert_eq!(untouched.len(), 1);

    // Second delete finds nothing.
    assert!(!TaskPadRepo::delete(&pool, pad.task_pad_id, ADA).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_foreign_pad_is_a_no_op(pool: PgPool) {
    let pad = TaskPadRepo::create(&pool, ADA, "Mine").await.unwrap();
    TaskRepo::create(&pool, &new_task(pad.task_pad_id, ADA, "Keep me"))
        .await
        .unwrap();

    assert!(!TaskPadRepo::delete(&pool, pad.task_pad_id, BOB).await.unwrap());
    assert!(TaskPadRepo::find_owned(&pool, pad.task_pad_id, ADA)
        .await
        .unwrap()
        .is_some());
    assert_eq!(
        TaskRepo::list_by_user(&pool, ADA, None).await.unwrap().len(),
        1
    );
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn task_order_is_per_pad(pool: PgPool) {
    let first = TaskPadRepo::create(&pool, ADA, "One").await.unwrap();
    let second = TaskPadRepo::create(&pool, ADA, "Two").await.unwrap();

    let a = TaskRepo::create(&pool, &new_task(first.task_pad_id, ADA, "a"))
        .await
        .unwrap()
        .unwrap();
    let b = TaskRepo::create(&pool, &new_task(first.task_pad_id, ADA, "b"))
        .await
        .unwrap()
        .unwrap();
    let c = TaskRepo::create(&pool, &new_task(second.task_pad_id, ADA, "c"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(a.task_item_order, 1);
    assert_eq!(b.task_item_order, 2);
    assert_eq!(c.task_item_order, 1);
    assert!(!a.is_completed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_order_is_kept(pool: PgPool) {
    let pad = TaskPadRepo::create(&pool, ADA, "One").await.unwrap();
    let mut input = new_task(pad.task_pad_id, ADA, "pinned");
    input.task_item_order = Some(10);

    let task = TaskRepo::create(&pool, &input).await.unwrap().unwrap();
    assert_eq!(task.task_item_order, 10);

    let next = TaskRepo::create(&pool, &new_task(pad.task_pad_id, ADA, "after"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(next.task_item_order, 11);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_task_in_foreign_pad_returns_none(pool: PgPool) {
    let pad = TaskPadRepo::create(&pool, ADA, "Mine").await.unwrap();
    let created = TaskRepo::create(&pool, &new_task(pad.task_pad_id, BOB, "sneaky"))
        .await
        .unwrap();
    assert!(created.is_none());
    assert!(TaskRepo::list_by_user(&pool, BOB, None)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completing_leaves_text_alone(pool: PgPool) {
    let pad = TaskPadRepo::create(&pool, ADA, "Groceries").await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(pad.task_pad_id, ADA, "Milk"))
        .await
        .unwrap()
        .unwrap();

    let input = UpdateTask {
        is_completed: Some(true),
        ..Default::default()
    };
    let outcome = TaskRepo::update(&pool, task.task_id, ADA, &input)
        .await
        .unwrap();

    assert_matches!(outcome, TaskUpdate::Updated(updated) => {
        assert!(updated.is_completed);
        assert_eq!(updated.title, "Milk");
        assert_eq!(updated.task_text, "Milk");
        assert_eq!(updated.task_item_order, task.task_item_order);
        assert!(updated.updated_at > task.updated_at);
    });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moving_task_appends_to_target_pad(pool: PgPool) {
    let from = TaskPadRepo::create(&pool, ADA, "From").await.unwrap();
    let to = TaskPadRepo::create(&pool, ADA, "To").await.unwrap();
    TaskRepo::create(&pool, &new_task(to.task_pad_id, ADA, "existing"))
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, &new_task(from.task_pad_id, ADA, "mover"))
        .await
        .unwrap()
        .unwrap();

    let input = UpdateTask {
        task_pad_id: Some(to.task_pad_id),
        ..Default::default()
    };
    let outcome = TaskRepo::update(&pool, task.task_id, ADA, &input)
        .await
        .unwrap();

    assert_matches!(outcome, TaskUpdate::Updated(moved) => {
        assert_eq!(moved.task_pad_id, to.task_pad_id);
        assert_eq!(moved.task_item_order, 2);
    });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moving_task_to_foreign_pad_is_rejected(pool: PgPool) {
    let mine = TaskPadRepo::create(&pool, ADA, "Mine").await.unwrap();
    let theirs = TaskPadRepo::create(&pool, BOB, "Theirs").await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(mine.task_pad_id, ADA, "stay"))
        .await
        .unwrap()
        .unwrap();

    let input = UpdateTask {
        task_pad_id: Some(theirs.task_pad_id),
        ..Default::default()
    };
    let outcome = TaskRepo::update(&pool, task.task_id, ADA, &input)
        .await
        .unwrap();
    assert_matches!(outcome, TaskUpdate::PadNotFound);

    let unchanged = TaskRepo::find_owned(&pool, task.task_id, ADA)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.task_pad_id, mine.task_pad_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_task(pool: PgPool) {
    let outcome = TaskRepo::update(&pool, 999_999, ADA, &UpdateTask::default())
        .await
        .unwrap();
    assert_matches!(outcome, TaskUpdate::TaskNotFound);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_task_is_owner_scoped(pool: PgPool) {
    let pad = TaskPadRepo::create(&pool, ADA, "Groceries").await.unwrap();
    let task = TaskRepo::create(&pool, &new_task(pad.task_pad_id, ADA, "Milk"))
        .await
        .unwrap()
        .unwrap();

    assert!(!TaskRepo::delete(&pool, task.task_id, BOB).await.unwrap());
    assert!(TaskRepo::delete(&pool, task.task_id, ADA).await.unwrap());
    assert!(!TaskRepo::delete(&pool, task.task_id, ADA).await.unwrap());
}
