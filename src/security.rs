//! Password hashing and verification.
//!
//! Registration stores an Argon2id PHC string with a fresh random salt;
//! login verifies the candidate against the stored string. Verification
//! never reports *why* it failed: a malformed stored hash and a wrong
//! password both come back as plain `false`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AppError, AppResult};

/// Well-formed Argon2id hash of a throwaway value. Verified against when a
/// login matches no account, so that path costs one full pass too.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$cGVwcGVyc2FsdDE2Ynl0ZQ$MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY";

/// Hash a password with a fresh random salt. Two calls on the same password
/// produce different strings.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a candidate password against a stored hash.
///
/// The digest comparison inside the argon2 crate is constant-time, and a
/// structurally invalid stored hash yields `false` rather than an error.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Run one verification against [`DUMMY_HASH`] and discard the result.
/// Called on the no-such-account login path so its cost matches the
/// wrong-password path.
pub fn equalize_verification_cost(password: &str) {
    let _ = verify_password(password, DUMMY_HASH);
}
