//! Backup document format and verification.

use serde_json::Value;

/// Format version written into every backup document.
pub const BACKUP_FORMAT_VERSION: &str = "1.0";

/// Tables every complete backup must contain.
pub const REQUIRED_TABLES: &[&str] = &["users", "canvases", "canvas_versions"];

/// Return the required tables missing from a backup document.
///
/// A document without a `tables` object is missing all of them.
pub fn missing_tables(backup: &Value) -> Vec<&'static str> {
    let tables = backup.get("tables").and_then(Value::as_object);
    REQUIRED_TABLES
        .iter()
        .copied()
        .filter(|name| {
            tables
                .and_then(|t| t.get(*name))
                .map_or(true, |rows| !rows.is_array())
        })
        .collect()
}

/// Whether a backup document contains every required table as an array.
pub fn verify_backup(backup: &Value) -> bool {
    missing_tables(backup).is_empty()
}
