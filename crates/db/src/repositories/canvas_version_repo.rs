//! Repository for the `canvas_versions` table.
//!
//! Versions are append-only. The only writer is [`CanvasVersionRepo::insert_snapshot`],
//! which must run inside the transaction that holds the canvas row lock.

use bmc_core::types::{new_id, DbId};
use sqlx::{PgConnection, PgPool};

use crate::models::canvas::Canvas;
use crate::models::canvas_version::CanvasVersion;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, canvas_id, version_number, key_partners, key_activities, \
    value_propositions, customer_relationships, customer_segments, key_resources, \
    channels, cost_structure, revenue_streams, saved_at";

/// Provides snapshot creation and history reads for canvas versions.
pub struct CanvasVersionRepo;

impl CanvasVersionRepo {
    /// Snapshot the given canvas state as the next version of that canvas.
    ///
    /// The version number is `max + 1` for the canvas. Callers hold the
    /// canvas row lock (`SELECT ... FOR UPDATE`) so numbering is serialized.
    pub async fn insert_snapshot(
        conn: &mut PgConnection,
        canvas: &Canvas,
    ) -> Result<CanvasVersion, sqlx::Error> {
        let query = format!(
            "INSERT INTO canvas_versions
                (id, canvas_id, version_number, key_partners, key_activities,
                 value_propositions, customer_relationships, customer_segments,
                 key_resources, channels, cost_structure, revenue_streams)
             VALUES (
                $1, $2,
                (SELECT COALESCE(MAX(version_number), 0) + 1 FROM canvas_versions WHERE canvas_id = $2),
                $3, $4, $5, $6, $7, $8, $9, $10, $11
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CanvasVersion>(&query)
            .bind(new_id())
            .bind(canvas.id)
            .bind(&canvas.key_partners)
            .bind(&canvas.key_activities)
            .bind(&canvas.value_propositions)
            .bind(&canvas.customer_relationships)
            .bind(&canvas.customer_segments)
            .bind(&canvas.key_resources)
            .bind(&canvas.channels)
            .bind(&canvas.cost_structure)
            .bind(&canvas.revenue_streams)
            .fetch_one(conn)
            .await
    }

    /// Find a version by ID, regardless of which canvas it belongs to.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CanvasVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM canvas_versions WHERE id = $1");
        sqlx::query_as::<_, CanvasVersion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a version by ID on an open connection, typically inside the
    /// transaction that holds the canvas row lock.
    pub(crate) async fn find_by_id_in(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<CanvasVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM canvas_versions WHERE id = $1");
        sqlx::query_as::<_, CanvasVersion>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List all versions of a canvas, newest first. Empty when none exist.
    pub async fn list_by_canvas(
        pool: &PgPool,
        canvas_id: DbId,
    ) -> Result<Vec<CanvasVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM canvas_versions
             WHERE canvas_id = $1
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, CanvasVersion>(&query)
            .bind(canvas_id)
            .fetch_all(pool)
            .await
    }

    /// Count the versions of a canvas.
    pub async fn count_by_canvas(pool: &PgPool, canvas_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM canvas_versions WHERE canvas_id = $1")
                .bind(canvas_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
