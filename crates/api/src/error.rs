use axum::extract::rejection::JsonRejection;
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bmc_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `bmc_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed, incomplete or over-specified JSON bodies are validation errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Core(CoreError::Validation(rejection.body_text()))
    }
}

/// Seconds a client should wait before retrying after a storage fault.
const RETRY_AFTER_SECS: &str = "1";

impl AppError {
    /// Lift transient database failures into [`CoreError::StorageUnavailable`].
    ///
    /// Everything else is returned unchanged.
    pub fn into_domain(self) -> Self {
        match self {
            AppError::Database(err) if is_transient_sqlx_error(&err) => {
                AppError::Core(CoreError::StorageUnavailable(err.to_string()))
            }
            other => other,
        }
    }

    /// Whether the client may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Core(core) if core.is_retryable())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let err = self.into_domain();
        let retryable = err.is_retryable();

        let (status, code, message) = match &err {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::VersionNotFound { .. } => {
                    (StatusCode::NOT_FOUND, "VERSION_NOT_FOUND", core.to_string())
                }
                CoreError::VersionMismatch { .. } => {
                    (StatusCode::CONFLICT, "VERSION_MISMATCH", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::StorageUnavailable(msg) => {
                    tracing::warn!(error = %msg, "Storage unavailable");
                    storage_unavailable()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        let mut response = (status, axum::Json(body)).into_response();
        if retryable {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from_static(RETRY_AFTER_SECS));
        }
        response
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn storage_unavailable() -> (StatusCode, &'static str, String) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        "STORAGE_UNAVAILABLE",
        "Storage is temporarily unavailable, please retry".to_string(),
    )
}

/// SQLSTATE codes for transient failures a client may retry.
///
/// `40001` serialization failure, `40P01` deadlock, `57P01` admin shutdown,
/// and the `08` connection exception class.
fn is_transient_sqlstate(code: &str) -> bool {
    matches!(code, "40001" | "40P01" | "57P01") || code.starts_with("08")
}

/// Pool exhaustion, connection loss and transient SQLSTATEs.
fn is_transient_sqlx_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => true,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .as_deref()
            .is_some_and(is_transient_sqlstate),
        _ => false,
    }
}

/// Classify a non-transient sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
///
/// Transient failures never reach here; [`AppError::into_domain`] turns them
/// into [`CoreError::StorageUnavailable`] first.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let code = db_err.code();
            // PostgreSQL unique constraint violation: error code 23505
            if code.as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        conflict_message(constraint),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal_error()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}

fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "An account with this email already exists".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}
