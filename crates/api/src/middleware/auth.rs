//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use bmc_core::error::CoreError;
use bmc_core::owner::{CanvasOwner, OwnerId};
use bmc_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// This is the identity adapter between HTTP credentials and the canvas
/// store: the store only ever sees [`AuthUser::owner`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: DbId,
    /// Canvas owner the token speaks for.
    owner: OwnerId,
    /// The user's role name.
    pub role: String,
}

impl AuthUser {
    /// The opaque owner id under which this user's canvas is stored.
    pub fn owner(&self) -> OwnerId {
        self.owner.clone()
    }

    pub fn canvas_owner(&self) -> CanvasOwner {
        CanvasOwner::from(self.owner())
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
            .get(AUTHORIZATION)
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

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            owner: claims.owner(),
            role: claims.role,
        })
    }
}
