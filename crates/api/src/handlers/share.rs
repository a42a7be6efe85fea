//! Public, read-only access to canvases through share tokens.

use axum::extract::{Path, State};
use axum::Json;
use bmc_core::canvas::{is_well_formed_share_token, CanvasFields};
use bmc_core::error::CoreError;
use bmc_core::types::{DbId, Timestamp};
use bmc_db::models::canvas::Canvas;
use bmc_db::repositories::CanvasRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// What a share-link holder sees: the fields, never the owner.
#[derive(Debug, Serialize)]
pub struct SharedCanvas {
    pub id: DbId,
    #[serde(flatten)]
    pub fields: CanvasFields,
    pub updated_at: Timestamp,
}

impl From<Canvas> for SharedCanvas {
    fn from(canvas: Canvas) -> Self {
        Self {
            id: canvas.id,
            fields: canvas.fields(),
            updated_at: canvas.updated_at,
        }
    }
}

/// GET /api/v1/share/{token}
///
/// No authentication. Unknown, stale and malformed tokens all answer 404.
pub async fn resolve_share_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<DataResponse<SharedCanvas>>> {
    let not_found = || AppError::Core(CoreError::not_found("Share link", &token));

    if !is_well_formed_share_token(&token) {
        return Err(not_found());
    }

    let canvas = CanvasRepo::find_by_share_token(&state.pool, &token)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(DataResponse {
        data: SharedCanvas::from(canvas),
    }))
}
