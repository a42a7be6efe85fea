//! Whole-account operations spanning users, canvases and versions.

use bmc_core::owner::{CanvasOwner, OwnerId};
use bmc_core::types::DbId;
use sqlx::PgPool;

use crate::models::account::AccountData;
use crate::models::user::UserResponse;
use crate::repositories::canvas_repo::CanvasRepo;
use crate::repositories::canvas_version_repo::CanvasVersionRepo;
use crate::repositories::user_repo::UserRepo;

/// Provides personal-data export and account deletion.
pub struct AccountRepo;

impl AccountRepo {
    /// Collect everything stored about a user.
    ///
    /// Returns `None` if the user does not exist. The canvas is `None` when
    /// the user never opened or saved one.
    pub async fn export_user_data(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<AccountData>, sqlx::Error> {
        let Some(user) = UserRepo::find_by_id(pool, user_id).await? else {
            return Ok(None);
        };

        let owner = CanvasOwner::User(OwnerId::from(user_id));
        let canvas = CanvasRepo::find_by_owner(pool, &owner).await?;
        let versions = match &canvas {
            Some(c) => CanvasVersionRepo::list_by_canvas(pool, c.id).await?,
            None => Vec::new(),
        };

        Ok(Some(AccountData {
            exported_at: chrono::Utc::now(),
            user: UserResponse::from(&user),
            canvas,
            versions,
        }))
    }

    /// Delete a user and all their data in one transaction.
    ///
    /// Versions go with the canvas and sessions go with the user through
    /// `ON DELETE CASCADE`. Returns `false` if the user did not exist.
    pub async fn delete_user_data(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let owner = OwnerId::from(user_id);
        let mut tx = pool.begin().await?;

        let canvases = sqlx::query("DELETE FROM canvases WHERE owner_id = $1")
            .bind(owner.as_str())
            .execute(&mut *tx)
            .await?;

        let users = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if users.rows_affected() == 0 {
            // Nothing to delete; the transaction rolls back on drop.
            return Ok(false);
        }

        tx.commit().await?;
        tracing::debug!(
            user_id = %user_id,
            canvases = canvases.rows_affected(),
            "Account data deleted"
        );
        Ok(true)
    }
}
