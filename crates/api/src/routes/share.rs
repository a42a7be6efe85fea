use axum::routing::get;
use axum::Router;

use crate::handlers::share;
use crate::state::AppState;

/// Routes mounted at `/share`. Public: no authentication.
pub fn router() -> Router<AppState> {
    Router::new().route("/{token}", get(share::resolve_share_token))
}
