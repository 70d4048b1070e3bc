//! Client side of TaskHive.
//!
//! - [`api::TaskHiveClient`] -- typed calls against the REST API.
//! - [`board::Board`] -- the pads and tasks a user sees, kept in sync with
//!   the server by applying changes only after the API confirms them.

pub mod api;
pub mod board;
pub mod wire;

pub use api::{ClientError, TaskHiveClient};
pub use board::{Board, PadView};
