//! Argon2id password hashing for the mock user directory.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;
use tracing::warn;
use zeroize::Zeroizing;

/// Memory cost in KiB. The directory only holds demo accounts, so the cost
/// is kept low enough for fast start-up.
const MEMORY_KIB: u32 = 4096;
const ITERATIONS: u32 = 2;

/// Hashing failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to hash password: {message}")]
pub struct PasswordHashError {
    message: String,
}

fn hasher() -> Result<Argon2<'static>, PasswordHashError> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, 1, None).map_err(|err| PasswordHashError {
        message: err.to_string(),
    })?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash `password` into a PHC string with a random salt.
pub(super) fn hash(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHashError {
            message: err.to_string(),
        })?;
    Ok(hash.to_string())
}

/// Whether `password` matches the PHC string `hash`. Malformed hashes never
/// match.
pub(super) fn verify(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// [`hash`] on the blocking pool.
pub(super) async fn hash_blocking(password: &str) -> Result<String, PasswordHashError> {
    let password = Zeroizing::new(password.to_owned());
    tokio::task::spawn_blocking(move || hash(&password))
        .await
        .map_err(|err| PasswordHashError {
            message: err.to_string(),
        })?
}

/// [`verify`] on the blocking pool. A failed task never matches.
pub(super) async fn verify_blocking(password: &str, hash: String) -> bool {
    let password = Zeroizing::new(password.to_owned());
    match tokio::task::spawn_blocking(move || verify(&password, &hash)).await {
        Ok(matched) => matched,
        Err(err) => {
            warn!(error = %err, "password verification task failed");
            false
        }
    }
}
