//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use taskhive_core::error::CoreError;
use taskhive_core::identity::{normalize_email, same_owner};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Signed-in user extracted from the session token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(owner = %user.email, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Normalized email address; the owner key for pads and tasks.
    pub email: String,
    /// Identity provider's user id (`claims.sub`).
    pub subject: String,
}

impl AuthUser {
    /// Reject with 403 unless `claimed` names this user.
    pub fn ensure_owner(&self, claimed: &str) -> AppResult<()> {
        if same_owner(&self.email, claimed) {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "Email does not match the signed-in user".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = state.sessions.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected session token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        let email = normalize_email(&claims.email).map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Session does not carry a usable email".into(),
            ))
        })?;

        Ok(AuthUser {
            email,
            subject: claims.sub,
        })
    }
}
