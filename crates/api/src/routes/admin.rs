//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the `admin` role.
///
/// ```text
/// GET  /backup         -> create_backup
/// POST /backup/verify  -> verify_backup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/backup", get(admin::create_backup))
        .route("/backup/verify", post(admin::verify_backup))
}
