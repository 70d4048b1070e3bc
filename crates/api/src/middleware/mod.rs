//! Request extractors enforcing authentication.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in owner from a session Bearer token.

pub mod auth;
