//! Argon2id password hashing, verification, and strength validation.
//!
//! Hashes are stored as PHC strings so algorithm parameters and salt travel
//! with the hash itself.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only for malformed hashes.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Check a password against the minimum length, counted in characters.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.chars().count() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct-horse-battery").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse-battery", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_password_length() {
        let err = validate_password_strength("short", 8).unwrap_err();
        assert!(err.contains("at least 8 characters"));
        assert!(validate_password_strength("exactly8", 8).is_ok());
        // Eight multibyte characters meet an 8-character minimum.
        assert!(validate_password_strength("éééééééé", 8).is_ok());
    }
}
