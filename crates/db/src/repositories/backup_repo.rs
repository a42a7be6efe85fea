//! Full-database JSON backup.

use bmc_core::backup::BACKUP_FORMAT_VERSION;
use sqlx::PgPool;

use crate::models::account::{BackupDocument, BackupTables};
use crate::models::canvas::Canvas;
use crate::models::canvas_version::CanvasVersion;
use crate::models::user::UserResponse;

/// Provides consistent snapshots of every backed-up table.
pub struct BackupRepo;

impl BackupRepo {
    /// Read every backed-up table inside one read-only `REPEATABLE READ`
    /// transaction so the tables agree with each other.
    ///
    /// Credentials (password hashes, verification codes) are never included.
    pub async fn snapshot(pool: &PgPool) -> Result<BackupDocument, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let users = sqlx::query_as::<_, UserResponse>(
            "SELECT id, email, name, role, email_verified, last_login_at, created_at, updated_at
             FROM users ORDER BY created_at, id",
        )
        .fetch_all(&mut *tx)
        .await?;

        let canvases = sqlx::query_as::<_, Canvas>(
            "SELECT id, owner_id, key_partners, key_activities, value_propositions,
                    customer_relationships, customer_segments, key_resources, channels,
                    cost_structure, revenue_streams, share_token, created_at, updated_at
             FROM canvases ORDER BY created_at, id",
        )
        .fetch_all(&mut *tx)
        .await?;

        let canvas_versions = sqlx::query_as::<_, CanvasVersion>(
            "SELECT id, canvas_id, version_number, key_partners, key_activities,
                    value_propositions, customer_relationships, customer_segments,
                    key_resources, channels, cost_structure, revenue_streams, saved_at
             FROM canvas_versions ORDER BY canvas_id, version_number",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(BackupDocument {
            timestamp: chrono::Utc::now(),
            version: BACKUP_FORMAT_VERSION,
            tables: BackupTables {
                users,
                canvases,
                canvas_versions,
            },
        })
    }
}
