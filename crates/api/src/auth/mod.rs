//! Authentication primitives.
//!
//! - [`session`] -- identity-provider session token verification.

pub mod session;
