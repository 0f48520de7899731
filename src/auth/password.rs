//! Password hashing
//!
//! Digests use bcrypt's modular-crypt format (`$2b$<cost>$<salt><hash>`), so
//! the salt and cost travel with the stored value.
//!
//! bcrypt only reads the first 72 bytes of its input, so longer passwords are
//! refused outright rather than silently truncated.

use thiserror::Error;

/// Longest password, in bytes, that bcrypt hashes without truncation
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashing errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password exceeds {} bytes", MAX_PASSWORD_BYTES)]
    TooLong,
}

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_digest: String,
}

impl PasswordHasher {
    /// Create a hasher. Fails if `cost` is outside bcrypt's 4..=31 range.
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        let dummy_digest = bcrypt::hash("quotes-saver-dummy-password", cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(Self { cost, dummy_digest })
    }

    /// Hash a plaintext password with a fresh random salt
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong);
        }
        bcrypt::hash(plaintext, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// Returns `false` for malformed digests and for passwords over
    /// [`MAX_PASSWORD_BYTES`], which would otherwise match on their prefix.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            self.verify_dummy(plaintext);
            return false;
        }
        match bcrypt::verify(plaintext, digest) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password digest could not be parsed");
                false
            }
        }
    }

    /// Burn one verification against a throwaway digest.
    ///
    /// Used when the account does not exist so that the response time does not
    /// reveal whether a username is registered.
    pub fn verify_dummy(&self, plaintext: &str) {
        let _ = bcrypt::verify(plaintext, &self.dummy_digest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the tests fast
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let digest = hasher.hash("correct horse").unwrap();

        assert!(hasher.verify("correct horse", &digest));
        assert!(!hasher.verify("wrong horse", &digest));
    }

    #[test]
    fn test_same_password_gets_different_digests() {
        let hasher = hasher();
        let first = hasher.hash("pw1").unwrap();
        let second = hasher.hash("pw1").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("pw1", &first));
        assert!(hasher.verify("pw1", &second));
    }

    #[test]
    fn test_digest_embeds_algorithm_and_cost() {
        let digest = hasher().hash("pw").unwrap();
        assert!(digest.starts_with("$2b$04$"));
    }

    #[test]
    fn test_malformed_digest_is_a_mismatch() {
        let hasher = hasher();
        assert!(!hasher.verify("pw", ""));
        assert!(!hasher.verify("pw", "not-a-bcrypt-digest"));
        assert!(!hasher.verify("pw", "$2b$04$tooshort"));
    }

    #[test]
    fn test_overlong_password_refused() {
        let hasher = hasher();
        let limit = "a".repeat(MAX_PASSWORD_BYTES);
        let digest = hasher.hash(&limit).unwrap();
        assert!(hasher.verify(&limit, &digest));

        // Same 72-byte prefix must not match
        let longer = format!("{}XYZ", limit);
        assert!(!hasher.verify(&longer, &digest));
        assert!(matches!(hasher.hash(&longer), Err(PasswordError::TooLong)));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        assert!(PasswordHasher::new(2).is_err());
        assert!(PasswordHasher::new(32).is_err());
    }
}
