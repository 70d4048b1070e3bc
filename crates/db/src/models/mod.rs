//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for partial updates
//!
//! Request DTOs accept the camelCase names the web client sends and the
//! snake_case column names as aliases.

pub mod task;
pub mod task_pad;
