//! Access and refresh tokens.
//!
//! The access token is an HS256 JWT whose subject is the user id; that id is
//! also the opaque owner id the canvas store is keyed by, so a verified token
//! is all a handler needs to address the caller's canvas. Refresh tokens are
//! 256 random bits, hex encoded; `user_sessions` keeps only their SHA-256.

use bmc_core::owner::OwnerId;
use bmc_core::types::DbId;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    /// `user` or `admin`.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    /// The canvas owner this token speaks for.
    pub fn owner(&self) -> OwnerId {
        OwnerId::from(self.sub)
    }
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Bytes of entropy in a refresh token.
const REFRESH_TOKEN_BYTES: usize = 32;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or a lifetime is not an integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: env_i64(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            ),
        }
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a whole number")),
        Err(_) => default,
    }
}

/// Sign an access token for `user_id` with the configured lifetime.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: iat + config.access_token_expiry_mins * 60,
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry, returning the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// Mint a refresh token. Returns `(token, sha256_hex)`; only the hash is stored.
pub fn generate_refresh_token() -> (String, String) {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    let token: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    let hash = hash_refresh_token(&token);
    (token, hash)
}

pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
