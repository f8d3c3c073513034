//! One-way password hashing.
//!
//! Only bcrypt hashes are ever stored; plaintext passwords never reach the
//! database.

use anyhow::{anyhow, Result};
use bcrypt::{hash, verify};

/// Hashes `password` with the given bcrypt cost.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    hash(password, cost).map_err(|e| anyhow!("Failed to hash password: {}", e))
}

/// Checks `password` against a stored hash. A malformed hash is an error,
/// a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    verify(password, password_hash).map_err(|e| anyhow!("Failed to verify password: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn hash_is_not_the_plaintext_and_verifies() {
        let hashed = hash_password("admin", TEST_COST).unwrap();

        assert_ne!(hashed, "admin");
        assert!(verify_password("admin", &hashed).unwrap());
        assert!(!verify_password("Admin", &hashed).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("admin", "not-a-bcrypt-hash").is_err());
    }
}
