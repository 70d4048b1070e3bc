//! Domain rules for TaskHive.
//!
//! Pure functions and types shared by the database and HTTP layers. Nothing
//! in this crate performs I/O.

pub mod error;
pub mod identity;
pub mod ordering;
pub mod task;
pub mod types;
