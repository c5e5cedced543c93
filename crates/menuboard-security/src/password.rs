//! Admin password checks

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Verification failed")]
    VerificationFailed,
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        if parsed_hash.salt.is_none() || parsed_hash.hash.is_none() {
            return Err(PasswordError::HashError(
                "hash string has no salt or output".to_string(),
            ));
        }
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Check a candidate against the configured admin secret.
    ///
    /// The secret is either an argon2 PHC string or the plain password.
    pub fn matches_configured(candidate: &str, configured: &str) -> Result<bool, PasswordError> {
        if configured.starts_with("$argon2") {
            return Self::verify(candidate, configured);
        }
        Ok(digest_eq(candidate, configured))
    }
}

/// Constant-time comparison of SHA-256 digests.
fn digest_eq(a: &str, b: &str) -> bool {
    let left = Sha256::digest(a.as_bytes());
    let right = Sha256::digest(b.as_bytes());
    left.iter().zip(right.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
