// SPDX-License-Identifier: MIT

//! Password hashing and verification (Argon2id, salted PHC strings).

use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;

use crate::error::AppError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Hash a password with a fresh random salt.
///
/// The returned PHC string embeds algorithm, parameters, salt and hash;
/// it is the only form the password is ever stored in.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored PHC string.
///
/// A malformed stored hash verifies as false rather than erroring; the
/// caller treats it the same as a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
