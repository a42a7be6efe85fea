//! Handlers for the `/auth` resource (sign-up, verification, login,
//! refresh, logout, current user).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bmc_core::account::{
    generate_verification_code, normalize_email, normalize_name, verification_code_matches,
    LOCK_DURATION_MINS, MAX_FAILED_ATTEMPTS, MIN_PASSWORD_LENGTH, ROLE_USER,
};
use bmc_core::error::CoreError;
use bmc_core::types::DbId;
use bmc_db::models::session::CreateSession;
use bmc_db::models::user::{CreateUser, User, UserResponse};
use bmc_db::repositories::{SessionRepo, UserRepo};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Response for a successful sign-up.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: UserResponse,
    /// Present only when `EXPOSE_VERIFICATION_CODE` is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_code: Option<String>,
}

/// Request body for `POST /auth/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub user_id: DbId,
    pub code: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an unverified account and issue a 6-digit verification code.
/// Codes are logged rather than emailed.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<SignupResponse>>)> {
    let Json(input) = payload?;
    let email = normalize_email(&input.email);
    if !email.validate_email() {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid email address".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let name = normalize_name(input.name.as_deref())?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let code = generate_verification_code();

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            name,
            password_hash,
            role: ROLE_USER.to_string(),
            verification_code: Some(code.clone()),
        },
    )
    .await?;

    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        verification_code = %code,
        "User signed up, verification code issued"
    );

    let verification_code = state.config.expose_verification_code.then_some(code);
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SignupResponse {
                user: UserResponse::from(&user),
                verification_code,
            },
        }),
    ))
}

/// POST /api/v1/auth/verify
///
/// Confirm an email address with the code issued at sign-up.
pub async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let Json(input) = payload?;
    let user = UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", input.user_id)))?;

    if user.email_verified {
        return Ok(Json(DataResponse {
            data: UserResponse::from(&user),
        }));
    }

    if !verification_code_matches(user.verification_code.as_deref(), &input.code) {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid verification code".into(),
        )));
    }

    UserRepo::mark_email_verified(&state.pool, user.id).await?;
    tracing::info!(user_id = %user.id, "Email verified");

    let user = UserRepo::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", input.user_id)))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let Json(input) = payload?;

    // 1. Find user by email.
    let user = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(invalid_credentials)?;

    // 2. Check if the account is temporarily locked.
    if let Some(locked_until) = user.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    // 3. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 4. On failure: increment counter, lock if threshold reached.
        let failures = UserRepo::increment_failed_login(&state.pool, user.id).await?;
        if failures >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            UserRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(user_id = %user.id, failures, "Account locked after failed logins");
        }
        return Err(invalid_credentials());
    }

    // 5. Only verified accounts may sign in.
    if !user.email_verified {
        return Err(AppError::Core(CoreError::Forbidden(
            "Email address has not been verified".into(),
        )));
    }

    // 6. On success: reset failed count, set last_login_at.
    UserRepo::record_successful_login(&state.pool, user.id).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let Json(input) = payload?;
    let token_hash = hash_refresh_token(&input.refresh_token);

    // Rotation: the presented token is revoked as it is redeemed.
    let session = SessionRepo::consume_refresh_token(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = %auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    })
}
