//! Whole-account documents: personal data export and full backups.

use bmc_core::types::Timestamp;
use serde::Serialize;

use super::canvas::Canvas;
use super::canvas_version::CanvasVersion;
use super::user::UserResponse;

/// Everything stored about one user.
#[derive(Debug, Clone, Serialize)]
pub struct AccountData {
    pub exported_at: Timestamp,
    pub user: UserResponse,
    pub canvas: Option<Canvas>,
    pub versions: Vec<CanvasVersion>,
}

/// Rows of every backed-up table.
#[derive(Debug, Clone, Serialize)]
pub struct BackupTables {
    pub users: Vec<UserResponse>,
    pub canvases: Vec<Canvas>,
    pub canvas_versions: Vec<CanvasVersion>,
}

/// A full JSON backup of the service's data.
#[derive(Debug, Clone, Serialize)]
pub struct BackupDocument {
    pub timestamp: Timestamp,
    pub version: &'static str,
    pub tables: BackupTables,
}
