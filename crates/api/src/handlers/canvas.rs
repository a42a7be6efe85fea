//! Handlers for the caller's canvas and its version history.
//!
//! The live canvas is addressed implicitly through the caller's identity
//! (`/canvas`); history and sharing use the canvas id, which must belong to
//! the caller. A canvas owned by someone else answers 404, exactly like a
//! missing one.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_DISPOSITION;
use axum::Json;
use bmc_core::canvas::CanvasFields;
use bmc_core::error::CoreError;
use bmc_core::export::{build_export, content_disposition, CanvasExport};
use bmc_core::types::DbId;
use bmc_db::models::canvas::{Canvas, ShareLink};
use bmc_db::models::canvas_version::CanvasVersion;
use bmc_db::repositories::{CanvasRepo, CanvasVersionRepo, RestoreOutcome};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Live canvas
// ---------------------------------------------------------------------------

/// GET /api/v1/canvas
///
/// Return the caller's canvas, creating it from the template on first access.
pub async fn get_canvas(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Canvas>>> {
    let canvas = CanvasRepo::get_or_create(&state.pool, &auth_user.canvas_owner()).await?;
    Ok(Json(DataResponse { data: canvas }))
}

/// PUT /api/v1/canvas
///
/// Replace all nine fields. The previous state is kept as a version.
pub async fn save_canvas(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: Result<Json<CanvasFields>, JsonRejection>,
) -> AppResult<Json<DataResponse<Canvas>>> {
    let Json(fields) = payload?;
    fields.validate_lengths()?;

    let outcome = CanvasRepo::save(&state.pool, &auth_user.owner(), &fields).await?;

    tracing::info!(
        user_id = %auth_user.user_id,
        canvas_id = %outcome.canvas.id,
        version_number = outcome.snapshot.as_ref().map(|v| v.version_number),
        "Canvas saved"
    );

    Ok(Json(DataResponse {
        data: outcome.canvas,
    }))
}

/// GET /api/v1/canvas/export
///
/// Download the caller's canvas as a JSON document.
pub async fn export_canvas(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<([(axum::http::HeaderName, String); 1], Json<CanvasExport>)> {
    let canvas = CanvasRepo::get_or_create(&state.pool, &auth_user.canvas_owner()).await?;
    let export = build_export(canvas.fields(), chrono::Utc::now());
    Ok(([(CONTENT_DISPOSITION, content_disposition())], Json(export)))
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// GET /api/v1/canvases/{id}/versions
///
/// List the canvas's versions, newest first.
pub async fn list_versions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(canvas_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CanvasVersion>>>> {
    ensure_owned_canvas(&state, &auth_user, canvas_id).await?;
    let versions = CanvasVersionRepo::list_by_canvas(&state.pool, canvas_id).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// POST /api/v1/canvases/{id}/versions/{version_id}/restore
///
/// Copy a version's fields back onto the canvas. The overwritten state is
/// not recorded as a new version.
pub async fn restore_version(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((canvas_id, version_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Canvas>>> {
    ensure_owned_canvas(&state, &auth_user, canvas_id).await?;

    match CanvasRepo::restore_version(&state.pool, canvas_id, version_id).await? {
        RestoreOutcome::Restored(canvas) => {
            tracing::info!(
                user_id = %auth_user.user_id,
                canvas_id = %canvas_id,
                version_id = %version_id,
                "Canvas version restored"
            );
            Ok(Json(DataResponse { data: canvas }))
        }
        RestoreOutcome::CanvasNotFound => {
            Err(AppError::Core(CoreError::not_found("Canvas", canvas_id)))
        }
        RestoreOutcome::VersionNotFound => Err(AppError::Core(CoreError::VersionNotFound {
            version_id: version_id.to_string(),
        })),
        RestoreOutcome::VersionMismatch => Err(AppError::Core(CoreError::VersionMismatch {
            canvas_id: canvas_id.to_string(),
            version_id: version_id.to_string(),
        })),
    }
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

/// POST /api/v1/canvases/{id}/share
///
/// Mint a new share token. Links built from the previous token stop working.
pub async fn create_share_link(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(canvas_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ShareLink>>> {
    ensure_owned_canvas(&state, &auth_user, canvas_id).await?;

    let share_token = CanvasRepo::regenerate_share_token(&state.pool, canvas_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Canvas", canvas_id)))?;

    tracing::info!(user_id = %auth_user.user_id, canvas_id = %canvas_id, "Share link regenerated");

    let share_url = state.config.share_url(&share_token);
    Ok(Json(DataResponse {
        data: ShareLink {
            share_token,
            share_url,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a canvas and check it belongs to the caller.
async fn ensure_owned_canvas(
    state: &AppState,
    auth_user: &AuthUser,
    canvas_id: DbId,
) -> AppResult<Canvas> {
    CanvasRepo::find_by_id(&state.pool, canvas_id)
        .await?
        .filter(|canvas| canvas.is_owned_by(&auth_user.owner()))
        .ok_or_else(|| AppError::Core(CoreError::not_found("Canvas", canvas_id)))
}
