//! Password hashing helpers backed by bcrypt.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::error::auth::AuthError;

const MIN_PASSWORD_LENGTH: usize = 8;

/// Hashes a plaintext password, rejecting ones that are too short.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    if plain.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooWeak);
    }
    Ok(hash(plain, DEFAULT_COST)?)
}

/// Verifies a plaintext password against a stored hash.
///
/// A malformed stored hash counts as a failed verification rather
/// than a server error, so login never leaks hash-format details.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    verify(plain, hashed).unwrap_or(false)
}
