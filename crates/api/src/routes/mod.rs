pub mod account;
pub mod admin;
pub mod auth;
pub mod canvas;
pub mod health;
pub mod share;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     sign up (public)
/// /auth/verify                                     verify email (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user (requires auth)
///
/// /canvas                                          get-or-create, save (auth)
/// /canvas/export                                   JSON export (auth)
/// /canvases/{id}/versions                          list history (owner)
/// /canvases/{id}/versions/{version_id}/restore     restore (POST, owner)
/// /canvases/{id}/share                             regenerate share link (POST, owner)
///
/// /share/{token}                                   shared canvas (public, read-only)
///
/// /account/export                                  personal data export (auth)
/// /account                                         delete account (DELETE, auth)
///
/// /admin/backup                                    full JSON backup (admin)
/// /admin/backup/verify                             verify a backup (POST, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(canvas::router())
        .nest("/share", share::router())
        .nest("/account", account::router())
        .nest("/admin", admin::router())
}
