use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/account`.
///
/// ```text
/// GET    /export  -> export_account
/// DELETE /        -> delete_account
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", get(account::export_account))
        .route("/", delete(account::delete_account))
}
