//! Password hashing and verification utilities
//!
//! Uses Argon2id for secure password hashing (OWASP recommended).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// A syntactically valid Argon2id hash that no password produces.
///
/// Login verifies against this when no account matches the email, so the
/// unknown-email and wrong-password paths run the same key derivation and
/// are indistinguishable by timing.
pub const DECOY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if the hash is not a valid PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Verify a password against a hash that may be absent.
///
/// When `hash` is `None` the check still runs a full Argon2 verification
/// against [`DECOY_PASSWORD_HASH`] and then reports a mismatch, keeping
/// the cost of the two failure modes identical.
pub fn verify_password_or_decoy(password: &str, hash: Option<&str>) -> Result<bool, AppError> {
    match hash {
        Some(hash) => verify_password(password, hash),
        None => {
            let _ = verify_password(password, DECOY_PASSWORD_HASH);
            Ok(false)
        }
    }
}

/// Validate password strength
///
/// Returns `Ok(())` if the password meets requirements:
/// - At least 8 characters
/// - Contains at least one uppercase letter
/// - Contains at least one lowercase letter
/// - Contains at least one digit
///
/// # Errors
/// Returns a validation error if the password doesn't meet requirements
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    if password.len() < 8 {
        return Err(AppError::validation(
            "Password must be at least 8 characters long",
        ));
    }

    if !password.chars().any(char::is_uppercase) {
        return Err(AppError::validation(
            "Password must contain at least one uppercase letter",
        ));
    }

    if !password.chars().any(char::is_lowercase) {
        return Err(AppError::validation(
            "Password must contain at least one lowercase letter",
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(
            "Password must contain at least one digit",
        ));
    }

    Ok(())
}
