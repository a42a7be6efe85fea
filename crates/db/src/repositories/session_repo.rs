//! Repository for the `user_sessions` table.
//!
//! A session row is the server side of one refresh token. Tokens are
//! single-use: [`SessionRepo::consume_refresh_token`] revokes the row in the
//! same statement that finds it, so two concurrent refreshes with the same
//! token cannot both succeed.

use bmc_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::session::{CreateSession, UserSession};

const COLUMNS: &str =
    "id, user_id, refresh_token_hash, expires_at, is_revoked, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Store the hash of a freshly issued refresh token.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (id, user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(new_id())
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Redeem a refresh token.
    ///
    /// Returns the session (now revoked) if the token was live, `None` if it
    /// is unknown, expired or already used.
    pub async fn consume_refresh_token(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET is_revoked = true, updated_at = NOW()
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// Sign a user out everywhere. Returns how many live sessions were revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true, updated_at = NOW()
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Purge sessions that can never be redeemed again.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_sessions WHERE expires_at < NOW() OR is_revoked = true")
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
