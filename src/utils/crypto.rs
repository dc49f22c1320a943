use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::Result;

/// Hashes a plaintext credential into a PHC string suitable for storage.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();
    Ok(password_hash)
}

/// Returns `false` for a wrong password; errors only when the stored hash is
/// unreadable.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hashed)?;
    let ok = Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(ok)
}

/// Runs the (deliberately slow) hash off the async executor.
pub async fn hash_password_blocking(plain: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| crate::error::Error::Internal(format!("Hashing task failed: {}", e)))?
}

pub async fn verify_password_blocking(plain: String, hashed: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hashed))
        .await
        .map_err(|e| crate::error::Error::Internal(format!("Verification task failed: {}", e)))?
}
