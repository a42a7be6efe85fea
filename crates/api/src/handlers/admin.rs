//! Handlers for the `/admin` resource (backups).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::HeaderName;
use axum::Json;
use bmc_core::backup::missing_tables;
use bmc_db::models::account::BackupDocument;
use bmc_db::repositories::BackupRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of `POST /admin/backup/verify`.
#[derive(Debug, Serialize)]
pub struct BackupVerification {
    pub valid: bool,
    pub missing_tables: Vec<&'static str>,
}

/// GET /api/v1/admin/backup
///
/// Download a JSON backup of every table. The document is returned as-is
/// (no `data` envelope) so it can be fed straight back to `verify`.
pub async fn create_backup(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<([(HeaderName, String); 1], Json<BackupDocument>)> {
    let backup = BackupRepo::snapshot(&state.pool).await?;

    tracing::info!(
        admin_id = %admin.user_id,
        users = backup.tables.users.len(),
        canvases = backup.tables.canvases.len(),
        canvas_versions = backup.tables.canvas_versions.len(),
        "Backup created"
    );

    let filename = format!(
        "attachment; filename=\"backup-{}.json\"",
        backup.timestamp.format("%Y%m%dT%H%M%SZ")
    );
    Ok(([(CONTENT_DISPOSITION, filename)], Json(backup)))
}

/// POST /api/v1/admin/backup/verify
///
/// Check that a backup document contains every required table.
pub async fn verify_backup(
    RequireAdmin(_admin): RequireAdmin,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<DataResponse<BackupVerification>>> {
    let Json(document) = payload?;
    let missing = missing_tables(&document);
    Ok(Json(DataResponse {
        data: BackupVerification {
            valid: missing.is_empty(),
            missing_tables: missing,
        },
    }))
}
