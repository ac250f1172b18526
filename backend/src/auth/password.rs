//! Password hashing using bcrypt
//!
//! bcrypt is intentionally CPU-intensive, so the async variants move the
//! work onto the blocking thread pool.

use anyhow::Result;

/// bcrypt cost factor (2^10 rounds)
pub const HASH_COST: u32 = 10;

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a fresh random salt (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        bcrypt::hash(password, HASH_COST)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// A mismatch is `Ok(false)`. An unparseable stored hash is an error,
    /// since it means the stored record is corrupt.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hash = PasswordService::hash(password).unwrap();

        assert!(PasswordService::verify(password, &hash).unwrap());
        assert!(!PasswordService::verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_uses_fixed_cost() {
        let hash = PasswordService::hash("secret1").unwrap();
        assert!(hash.starts_with("$2b$10$"), "unexpected hash prefix: {}", hash);
        assert_ne!(hash, "secret1");
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "test_password";
        let hash1 = PasswordService::hash(password).unwrap();
        let hash2 = PasswordService::hash(password).unwrap();

        // Hashes should be different due to random salt
        assert_ne!(hash1, hash2);

        assert!(PasswordService::verify(password, &hash1).unwrap());
        assert!(PasswordService::verify(password, &hash2).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(PasswordService::verify("secret1", "not-a-bcrypt-hash").is_err());
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let password = "async_test_password".to_string();
        let hash = PasswordService::hash_async(password.clone()).await.unwrap();

        assert!(PasswordService::verify_async(password.clone(), hash.clone())
            .await
            .unwrap());
        assert!(!PasswordService::verify_async("wrong".to_string(), hash)
            .await
            .unwrap());
    }
}
