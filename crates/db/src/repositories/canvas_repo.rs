//! Repository for the `canvases` table.
//!
//! Hosts the canvas store operations (get-or-create, save with snapshot,
//! restore, share-token rotation) and the share-token resolver. Every
//! multi-statement operation runs in a single transaction; dropping the
//! transaction on an early return or error rolls it back.

use bmc_core::canvas::{generate_share_token, CanvasFields, TEMPLATE_SHARE_TOKEN};
use bmc_core::owner::{CanvasOwner, OwnerId};
use bmc_core::types::{new_id, DbId};
use sqlx::{PgConnection, PgPool};

use crate::models::canvas::Canvas;
use crate::models::canvas_version::CanvasVersion;
use crate::repositories::canvas_version_repo::CanvasVersionRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, key_partners, key_activities, value_propositions, \
    customer_relationships, customer_segments, key_resources, channels, \
    cost_structure, revenue_streams, share_token, created_at, updated_at";

/// Result of [`CanvasRepo::save`].
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    /// The canvas after the save.
    pub canvas: Canvas,
    /// The snapshot of the pre-save state, `None` when the save created the canvas.
    pub snapshot: Option<CanvasVersion>,
}

/// Result of [`CanvasRepo::restore_version`].
#[derive(Debug, Clone)]
pub enum RestoreOutcome {
    Restored(Canvas),
    CanvasNotFound,
    VersionNotFound,
    /// The version exists but snapshots a different canvas.
    VersionMismatch,
}

/// Provides the canvas store and share resolver operations.
pub struct CanvasRepo;

impl CanvasRepo {
    // ── Lookups ──────────────────────────────────────────────────────

    /// Find a canvas by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Canvas>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM canvases WHERE id = $1");
        sqlx::query_as::<_, Canvas>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the canvas belonging to an owner (or the template).
    pub async fn find_by_owner(
        pool: &PgPool,
        owner: &CanvasOwner,
    ) -> Result<Option<Canvas>, sqlx::Error> {
        match owner {
            CanvasOwner::Template => {
                let query = format!(
                    "SELECT {COLUMNS} FROM canvases
                     WHERE owner_id IS NULL AND share_token = $1"
                );
                sqlx::query_as::<_, Canvas>(&query)
                    .bind(TEMPLATE_SHARE_TOKEN)
                    .fetch_optional(pool)
                    .await
            }
            CanvasOwner::User(owner_id) => {
                let query = format!("SELECT {COLUMNS} FROM canvases WHERE owner_id = $1");
                sqlx::query_as::<_, Canvas>(&query)
                    .bind(owner_id.as_str())
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Resolve a public share token to its canvas.
    ///
    /// Read-only and unauthenticated; `None` is the normal answer for stale
    /// or invalid links.
    pub async fn find_by_share_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<Canvas>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM canvases WHERE share_token = $1");
        sqlx::query_as::<_, Canvas>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    // ── Store operations ─────────────────────────────────────────────

    /// Return the owner's canvas, creating it on first access.
    ///
    /// A new canvas copies all nine fields from the template when one exists,
    /// otherwise starts empty, and always gets a fresh share token. Concurrent
    /// first accesses converge on a single row through the unique owner index.
    ///
    /// For [`CanvasOwner::Template`] the template is returned as-is; it is never
    /// created implicitly, so a missing template yields `RowNotFound`.
    pub async fn get_or_create(pool: &PgPool, owner: &CanvasOwner) -> Result<Canvas, sqlx::Error> {
        let owner_id = match owner {
            CanvasOwner::Template => {
                return Self::find_by_owner(pool, owner)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound);
            }
            CanvasOwner::User(owner_id) => owner_id,
        };

        if let Some(existing) = Self::find_by_owner(pool, owner).await? {
            return Ok(existing);
        }

        let query = format!(
            "INSERT INTO canvases
                (id, owner_id, key_partners, key_activities, value_propositions,
                 customer_relationships, customer_segments, key_resources,
                 channels, cost_structure, revenue_streams, share_token)
             SELECT $1, $2,
                COALESCE(t.key_partners, ''),
                COALESCE(t.key_activities, ''),
                COALESCE(t.value_propositions, ''),
                COALESCE(t.customer_relationships, ''),
                COALESCE(t.customer_segments, ''),
                COALESCE(t.key_resources, ''),
                COALESCE(t.channels, ''),
                COALESCE(t.cost_structure, ''),
                COALESCE(t.revenue_streams, ''),
                $3
             FROM (SELECT 1) AS seed
             LEFT JOIN canvases t ON t.owner_id IS NULL AND t.share_token = $4
             ON CONFLICT (owner_id) WHERE owner_id IS NOT NULL DO NOTHING
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Canvas>(&query)
            .bind(new_id())
            .bind(owner_id.as_str())
            .bind(generate_share_token())
            .bind(TEMPLATE_SHARE_TOKEN)
            .fetch_optional(pool)
            .await?;

        match created {
            Some(canvas) => {
                tracing::debug!(owner_id = %owner_id, canvas_id = %canvas.id, "Canvas created on first access");
                Ok(canvas)
            }
            // Lost the race against a concurrent creator; read the winner's row.
            None => Self::find_by_owner(pool, owner)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }

    /// Replace the owner's nine fields, snapshotting the previous state first.
    ///
    /// Runs as one transaction:
    /// 1. Insert the canvas if the owner has none (no snapshot is taken).
    /// 2. Otherwise lock the owner's row, insert a version holding its current
    ///    fields, then overwrite the fields and `updated_at`.
    ///
    /// Either the snapshot and the overwrite both commit or neither does.
    /// Fields must already be validated.
    pub async fn save(
        pool: &PgPool,
        owner: &OwnerId,
        fields: &CanvasFields,
    ) -> Result<SaveOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO canvases
                (id, owner_id, key_partners, key_activities, value_propositions,
                 customer_relationships, customer_segments, key_resources,
                 channels, cost_structure, revenue_streams, share_token)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             ON CONFLICT (owner_id) WHERE owner_id IS NOT NULL DO NOTHING
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Canvas>(&insert)
            .bind(new_id())
            .bind(owner.as_str())
            .bind(&fields.key_partners)
            .bind(&fields.key_activities)
            .bind(&fields.value_propositions)
            .bind(&fields.customer_relationships)
            .bind(&fields.customer_segments)
            .bind(&fields.key_resources)
            .bind(&fields.channels)
            .bind(&fields.cost_structure)
            .bind(&fields.revenue_streams)
            .bind(generate_share_token())
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(canvas) = created {
            tx.commit().await?;
            return Ok(SaveOutcome {
                canvas,
                snapshot: None,
            });
        }

        let lock = format!("SELECT {COLUMNS} FROM canvases WHERE owner_id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, Canvas>(&lock)
            .bind(owner.as_str())
            .fetch_one(&mut *tx)
            .await?;

        let snapshot = CanvasVersionRepo::insert_snapshot(&mut *tx, &current).await?;
        let canvas = Self::overwrite_fields(&mut *tx, current.id, fields).await?;

        tx.commit().await?;
        Ok(SaveOutcome {
            canvas,
            snapshot: Some(snapshot),
        })
    }

    /// Copy a version's fields back onto its canvas.
    ///
    /// History is left untouched: the state being overwritten is NOT
    /// snapshotted, so a restore cannot be undone unless the caller saved
    /// first.
    pub async fn restore_version(
        pool: &PgPool,
        canvas_id: DbId,
        version_id: DbId,
    ) -> Result<RestoreOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock = format!("SELECT {COLUMNS} FROM canvases WHERE id = $1 FOR UPDATE");
        let canvas = sqlx::query_as::<_, Canvas>(&lock)
            .bind(canvas_id)
            .fetch_optional(&mut *tx)
            .await?;
        if canvas.is_none() {
            return Ok(RestoreOutcome::CanvasNotFound);
        }

        let version = CanvasVersionRepo::find_by_id_in(&mut *tx, version_id).await?;

        let version = match version {
            None => return Ok(RestoreOutcome::VersionNotFound),
            Some(v) if v.canvas_id != canvas_id => return Ok(RestoreOutcome::VersionMismatch),
            Some(v) => v,
        };

        let restored = Self::overwrite_fields(&mut *tx, canvas_id, &version.fields()).await?;
        tx.commit().await?;
        Ok(RestoreOutcome::Restored(restored))
    }

    /// Mint a new share token for a canvas, invalidating the previous one.
    ///
    /// Returns `None` if the canvas does not exist. The template's well-known
    /// token is never rotated.
    pub async fn regenerate_share_token(
        pool: &PgPool,
        canvas_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "UPDATE canvases SET share_token = $2
             WHERE id = $1 AND owner_id IS NOT NULL
             RETURNING share_token",
        )
        .bind(canvas_id)
        .bind(generate_share_token())
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(token,)| token))
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Overwrite the nine fields of a canvas and bump `updated_at`.
    async fn overwrite_fields(
        conn: &mut PgConnection,
        canvas_id: DbId,
        fields: &CanvasFields,
    ) -> Result<Canvas, sqlx::Error> {
        let query = format!(
            "UPDATE canvases SET
                key_partners = $2,
                key_activities = $3,
                value_propositions = $4,
                customer_relationships = $5,
                customer_segments = $6,
                key_resources = $7,
                channels = $8,
                cost_structure = $9,
                revenue_streams = $10,
                updated_at = clock_timestamp()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Canvas>(&query)
            .bind(canvas_id)
            .bind(&fields.key_partners)
            .bind(&fields.key_activities)
            .bind(&fields.value_propositions)
            .bind(&fields.customer_relationships)
            .bind(&fields.customer_segments)
            .bind(&fields.key_resources)
            .bind(&fields.channels)
            .bind(&fields.cost_structure)
            .bind(&fields.revenue_streams)
            .fetch_one(conn)
            .await
    }
}
