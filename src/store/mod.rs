//! Persistence for users and quotes
//!
//! Gateways talk to storage only through [`CredentialStore`] and
//! [`QuoteStore`]. Two backends are provided:
//! - [`PgStore`] for PostgreSQL (the deployed configuration)
//! - [`MemoryStore`] for tests and local experiments

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Quote, QuoteId, User, UserId};

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record already exists")]
    AlreadyExists,

    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::AlreadyExists
            }
            // quotes.owner_id pointing at a missing user
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                StoreError::NotFound
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

/// Username to password-hash mapping.
///
/// `create` must be atomic: two concurrent calls with the same username
/// resolve to exactly one `Ok` and one `Err(AlreadyExists)`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn create(&self, username: &str, password_hash: &str) -> Result<UserId, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<User, StoreError>;
}

/// Quotes keyed by owning user
#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn insert(&self, owner_id: UserId, text: &str) -> Result<QuoteId, StoreError>;

    /// All quotes of `owner_id`, oldest first
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Quote>, StoreError>;
}
