//! Authentication service
//!
//! Registration and login over the credential store, the password hasher and
//! the token keys.

use std::sync::Arc;

use thiserror::Error;

use crate::models::{LoginResponse, UserId, MAX_USERNAME_LEN};
use crate::store::{CredentialStore, StoreError};

use super::jwt::{TokenError, TokenKeys};
use super::password::{PasswordError, PasswordHasher, MAX_PASSWORD_BYTES};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Username already exists")]
    UsernameTaken,

    /// Unknown user and wrong password both end here
    #[error("Bad username or password")]
    BadCredentials,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: Arc<TokenKeys>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenKeys>,
    ) -> Self {
        Self {
            credentials,
            hasher,
            tokens,
        }
    }

    /// Create an account. The password is stored only as a bcrypt digest.
    pub async fn register(&self, username: &str, password: &str) -> Result<UserId, AuthError> {
        validate_credentials(username, password)?;

        let digest = self.hash_password(password).await?;

        match self.credentials.create(username, &digest).await {
            Ok(user_id) => {
                tracing::info!(user_id = %user_id, "User registered");
                Ok(user_id)
            }
            Err(StoreError::AlreadyExists) => {
                tracing::debug!("Registration rejected: username taken");
                Err(AuthError::UsernameTaken)
            }
            Err(e) => Err(AuthError::Internal(e.to_string())),
        }
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        // No stored username holds a NUL, and the database would reject the lookup
        let user = if username.contains('\0') {
            None
        } else {
            match self.credentials.find_by_username(username).await {
                Ok(user) => Some(user),
                Err(StoreError::NotFound) => None,
                Err(e) => return Err(AuthError::Internal(e.to_string())),
            }
        };

        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let digest = user.as_ref().map(|u| u.password_hash.clone());
        let verified = tokio::task::spawn_blocking(move || match digest {
            Some(digest) => hasher.verify(&password, &digest),
            None => {
                hasher.verify_dummy(&password);
                false
            }
        })
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = match user {
            Some(user) if verified => user,
            _ => {
                tracing::debug!("Login rejected");
                return Err(AuthError::BadCredentials);
            }
        };

        let access_token = self.tokens.issue(user.id)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.tokens.ttl_seconds(),
        })
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let digest = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))??;
        Ok(digest)
    }
}

fn validate_credentials(username: &str, password: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() {
        return Err(AuthError::InvalidInput(
            "username must not be empty".to_string(),
        ));
    }
    if username.contains('\0') {
        return Err(AuthError::InvalidInput(
            "username must not contain NUL characters".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AuthError::InvalidInput(format!(
            "username must be at most {} characters",
            MAX_USERNAME_LEN
        )));
    }
    if password.is_empty() {
        return Err(AuthError::InvalidInput(
            "password must not be empty".to_string(),
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::InvalidInput(format!(
            "password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> (AuthService, Arc<TokenKeys>) {
        let tokens = Arc::new(TokenKeys::new("test-secret", 3600));
        let service = AuthService::new(
            Arc::new(MemoryStore::new()),
            PasswordHasher::new(4).unwrap(),
            tokens.clone(),
        );
        (service, tokens)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (service, tokens) = service();
        let user_id = service.register("alice", "pw1").await.unwrap();

        let response = service.login("alice", "pw1").await.unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3600);

        let user = tokens.verify(&response.access_token).unwrap();
        assert_eq!(user.user_id(), user_id);
    }

    #[tokio::test]
    async fn test_duplicate_username_taken_regardless_of_password() {
        let (service, _) = service();
        service.register("alice", "pw1").await.unwrap();

        let same = service.register("alice", "pw1").await;
        let different = service.register("alice", "pw2").await;
        assert!(matches!(same, Err(AuthError::UsernameTaken)));
        assert!(matches!(different, Err(AuthError::UsernameTaken)));
    }

    #[tokio::test]
    async fn test_empty_fields_rejected() {
        let (service, _) = service();
        assert!(matches!(
            service.register("", "pw").await,
            Err(AuthError::InvalidInput(_))
        ));
        assert!(matches!(
            service.register("   ", "pw").await,
            Err(AuthError::InvalidInput(_))
        ));
        assert!(matches!(
            service.register("alice", "").await,
            Err(AuthError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_overlong_username_rejected() {
        let (service, _) = service();
        let name = "a".repeat(MAX_USERNAME_LEN + 1);
        assert!(matches!(
            service.register(&name, "pw").await,
            Err(AuthError::InvalidInput(_))
        ));

        let name = "a".repeat(MAX_USERNAME_LEN);
        assert!(service.register(&name, "pw").await.is_ok());
    }

    #[tokio::test]
    async fn test_overlong_password_rejected_on_register() {
        let (service, _) = service();
        let password = "p".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(
            service.register("alice", &password).await,
            Err(AuthError::InvalidInput(_))
        ));

        let password = "p".repeat(MAX_PASSWORD_BYTES);
        service.register("alice", &password).await.unwrap();
        assert!(service.login("alice", &password).await.is_ok());

        // Same first 72 bytes, but not the password that was registered
        let longer = format!("{}extra", password);
        assert!(matches!(
            service.login("alice", &longer).await,
            Err(AuthError::BadCredentials)
        ));
    }

    #[tokio::test]
    async fn test_nul_in_username() {
        let (service, _) = service();
        assert!(matches!(
            service.register("ali\0ce", "pw").await,
            Err(AuthError::InvalidInput(_))
        ));

        service.register("alice", "pw1").await.unwrap();
        assert!(matches!(
            service.login("ali\0ce", "pw1").await,
            Err(AuthError::BadCredentials)
        ));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let (service, _) = service();
        service.register("alice", "pw1").await.unwrap();

        let wrong_password = service.login("alice", "pw2").await.unwrap_err();
        let unknown_user = service.login("mallory", "pw1").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::BadCredentials));
        assert!(matches!(unknown_user, AuthError::BadCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_admits_exactly_one() {
        let (service, _) = service();
        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.register("dave", "pw1").await })
        };
        let second = {
            let service = service.clone();
            tokio::spawn(async move { service.register("dave", "pw2").await })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];
        let ok = results.iter().filter(|r| r.is_ok()).count();
        let taken = results
            .iter()
            .filter(|r| matches!(r, Err(AuthError::UsernameTaken)))
            .count();
        assert_eq!(ok, 1);
        assert_eq!(taken, 1);
    }
}
