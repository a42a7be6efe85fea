//! Route definitions for the caller's canvas and its history.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::canvas;
use crate::state::AppState;

/// Canvas routes, merged at the `/api/v1` root.
///
/// ```text
/// GET  /canvas                                        -> get_canvas
/// PUT  /canvas                                        -> save_canvas
/// GET  /canvas/export                                 -> export_canvas
/// GET  /canvases/{id}/versions                        -> list_versions
/// POST /canvases/{id}/versions/{version_id}/restore   -> restore_version
/// POST /canvases/{id}/share                           -> create_share_link
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/canvas", get(canvas::get_canvas).put(canvas::save_canvas))
        .route("/canvas/export", get(canvas::export_canvas))
        .route("/canvases/{id}/versions", get(canvas::list_versions))
        .route(
            "/canvases/{id}/versions/{version_id}/restore",
            post(canvas::restore_version),
        )
        .route("/canvases/{id}/share", post(canvas::create_share_link))
}
