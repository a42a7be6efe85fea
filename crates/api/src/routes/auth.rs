//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup   -> signup
/// POST /verify   -> verify
/// POST /login    -> login
/// POST /refresh  -> refresh
/// POST /logout   -> logout (requires auth)
/// GET  /me       -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/verify", post(auth::verify))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}
