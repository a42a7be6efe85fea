//! JSON export document for a canvas.

use serde::Serialize;

use crate::canvas::CanvasFields;
use crate::types::Timestamp;

/// Title written into every export document.
pub const EXPORT_TITLE: &str = "Business Model Canvas";

/// Default download filename for the JSON export.
pub const EXPORT_FILENAME: &str = "business-model-canvas.json";

/// A self-describing JSON export of one canvas.
#[derive(Debug, Clone, Serialize)]
pub struct CanvasExport {
    pub title: &'static str,
    pub exported_at: Timestamp,
    pub data: CanvasFields,
}

/// Build the export document for the given fields.
pub fn build_export(fields: CanvasFields, exported_at: Timestamp) -> CanvasExport {
    CanvasExport {
        title: EXPORT_TITLE,
        exported_at,
        data: fields,
    }
}

/// `Content-Disposition` header value for the export download.
pub fn content_disposition() -> String {
    format!("attachment; filename=\"{EXPORT_FILENAME}\"")
}
