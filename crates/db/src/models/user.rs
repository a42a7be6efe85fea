//! User entity model and DTOs.

use bmc_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash and pending verification code -- NEVER
/// serialize this to API responses directly. Use [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub email_verified: bool,
    pub verification_code: Option<String>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses, exports and backups.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub email_verified: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            email_verified: user.email_verified,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user. `email` must already be normalized.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub verification_code: Option<String>,
}
