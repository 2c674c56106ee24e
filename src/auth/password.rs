//! Password Hashing Policy
//!
//! Centralizes how raw credentials become stored hashes: bcrypt with a
//! work factor injected from configuration (default 12). Hashing and
//! verification are deliberately slow, so both run on the blocking pool and
//! never stall the request dispatcher.
//!
//! Raw passwords are consumed here and nowhere else; they are never logged
//! and never stored.

use tokio::task;

use crate::error::ApiError;

/// Hashes and verifies passwords with a configured bcrypt work factor.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a raw password.
    pub async fn hash(&self, raw: &str) -> Result<String, ApiError> {
        let cost = self.cost;
        let raw = raw.to_string();
        task::spawn_blocking(move || bcrypt::hash(raw, cost))
            .await?
            .map_err(|e| {
                tracing::error!("password hashing failed: {e}");
                ApiError::internal("password hashing failed")
            })
    }

    /// Verify a raw password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`; only an internal bcrypt fault (for
    /// example a corrupt stored hash) is an error.
    pub async fn verify(&self, raw: &str, hash: &str) -> Result<bool, ApiError> {
        let raw = raw.to_string();
        let hash = hash.to_string();
        task::spawn_blocking(move || bcrypt::verify(raw, &hash))
            .await?
            .map_err(|e| {
                tracing::error!("password verification failed: {e}");
                ApiError::internal("password verification failed")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps these tests fast; production uses the configured
    // work factor.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[tokio::test]
    async fn hash_verifies_and_never_equals_plaintext() {
        let hashed = hasher().hash("Abcdef1!").await.unwrap();
        assert_ne!(hashed, "Abcdef1!");
        assert!(hasher().verify("Abcdef1!", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn wrong_password_is_ok_false_not_error() {
        let hashed = hasher().hash("Abcdef1!").await.unwrap();
        assert!(!hasher().verify("wrong", &hashed).await.unwrap());
    }

    #[tokio::test]
    async fn corrupt_hash_is_an_internal_error() {
        let result = hasher().verify("Abcdef1!", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(ApiError::Internal { .. })));
    }
}
