//! Argon2id password hashing and verification.
//!
//! Hashing is CPU-bound; async callers go through the `_bounded` wrappers,
//! which run the work on the blocking pool under a deadline.

use std::sync::OnceLock;
use std::time::Duration;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Budget for a single hash or verify, including the blocking-pool handoff.
pub const HASH_TIMEOUT: Duration = Duration::from_secs(5);

/// Hash a password into an Argon2id PHC string with a fresh per-record salt.
pub fn hash(password: &str) -> Result<String, anyhow::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hashed.to_string())
}

/// Verify a password against a stored PHC string. Argon2 recomputes the hash
/// under the stored parameters, so timing does not depend on where the inputs
/// differ. A malformed stored hash verifies as false.
pub fn verify(password: &str, phc: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(phc) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Hash on the blocking pool, bounded by `limit`.
pub async fn hash_bounded(plain: String, limit: Duration) -> Result<String, anyhow::Error> {
    tokio::time::timeout(limit, tokio::task::spawn_blocking(move || hash(&plain)))
        .await
        .map_err(|_| anyhow::anyhow!("password hashing timed out"))?
        .map_err(|e| anyhow::anyhow!("join password hash task: {e}"))?
}

/// Verify on the blocking pool, bounded by `limit`.
pub async fn verify_bounded(
    plain: String,
    phc: String,
    limit: Duration,
) -> Result<bool, anyhow::Error> {
    tokio::time::timeout(limit, tokio::task::spawn_blocking(move || verify(&plain, &phc)))
        .await
        .map_err(|_| anyhow::anyhow!("password verification timed out"))?
        .map_err(|e| anyhow::anyhow!("join password verify task: {e}"))
}

/// A valid hash of an unguessable value, verified against when the account
/// does not exist so lookup misses cost the same as wrong passwords.
pub fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| {
        hash("carelink-dummy-credential-burn").expect("hashing a fixed string cannot fail")
    })
}
