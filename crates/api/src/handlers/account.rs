//! Personal data export and account deletion for the authenticated user.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bmc_core::error::CoreError;
use bmc_db::models::account::AccountData;
use bmc_db::repositories::AccountRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/account/export
///
/// Everything stored about the caller: profile, canvas and full history.
pub async fn export_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<AccountData>>> {
    let data = AccountRepo::export_user_data(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", auth_user.user_id)))?;

    tracing::info!(user_id = %auth_user.user_id, versions = data.versions.len(), "Account data exported");
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/account
///
/// Permanently remove the caller's account, canvas, versions and sessions.
pub async fn delete_account(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<StatusCode> {
    let deleted = AccountRepo::delete_user_data(&state.pool, auth_user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found(
            "User",
            auth_user.user_id,
        )));
    }

    tracing::info!(user_id = %auth_user.user_id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}
