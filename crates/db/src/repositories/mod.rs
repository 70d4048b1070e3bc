//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every by-id method is
//! scoped to an owner email; rows belonging to someone else behave exactly
//! like missing rows.

pub mod task_pad_repo;
pub mod task_repo;

pub use task_pad_repo::TaskPadRepo;
pub use task_repo::{TaskRepo, TaskUpdate};
