//! Repository for the `users` table.

use bmc_core::types::{new_id, DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserResponse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, password_hash, role, email_verified, verification_code, \
                        failed_login_count, locked_until, last_login_at, created_at, updated_at";

/// Columns safe to expose in exports and backups.
const PUBLIC_COLUMNS: &str =
    "id, email, name, role, email_verified, last_login_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email (case-insensitive) fails with a unique violation on
    /// `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, email, name, password_hash, role, verification_code)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(new_id())
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.verification_code)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users (without secrets), oldest first.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<UserResponse>, sqlx::Error> {
        let query = format!("SELECT {PUBLIC_COLUMNS} FROM users ORDER BY created_at, id");
        sqlx::query_as::<_, UserResponse>(&query)
            .fetch_all(pool)
            .await
    }

    /// Mark the email as verified and clear the pending code.
    ///
    /// Returns `true` if the row was updated.
    pub async fn mark_email_verified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                email_verified = true,
                verification_code = NULL,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the failed login counter by 1, returning the new count.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<i32, sqlx::Error> {
        let row: (i32,) = sqlx::query_as(
            "UPDATE users SET failed_login_count = failed_login_count + 1
             WHERE id = $1
             RETURNING failed_login_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Lock a user account until the specified timestamp.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count` to 0, clear `locked_until`,
    /// and set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
