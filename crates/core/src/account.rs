//! Account rules: email normalization, password policy, verification codes,
//! and login lockout constants.

use rand::Rng;

use crate::error::CoreError;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Number of digits in an email verification code.
pub const VERIFICATION_CODE_DIGITS: usize = 6;

/// Maximum consecutive failed login attempts before locking the account.
pub const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
pub const LOCK_DURATION_MINS: i64 = 15;

/// Maximum length of the optional display name.
pub const MAX_NAME_LENGTH: usize = 255;

/// Role names. Must match the `role` check constraint on `users`.
pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// Lower-case and trim an email so uniqueness is case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim an optional display name, mapping blank names to `None`.
pub fn normalize_name(name: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(Some(name.to_string()))
}

/// Generate a random 6-digit verification code (100000..=999999).
pub fn generate_verification_code() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}

/// Compare a submitted verification code against the stored one.
///
/// An account with no pending code never matches.
pub fn verification_code_matches(expected: Option<&str>, submitted: &str) -> bool {
    expected.is_some_and(|code| code == submitted.trim())
}
