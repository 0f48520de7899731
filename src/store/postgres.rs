//! PostgreSQL-backed stores

use async_trait::async_trait;
use sqlx::PgPool;

use super::{CredentialStore, QuoteStore, StoreError};
use crate::models::{Quote, QuoteId, User, UserId};

/// Both stores over one connection pool
#[derive(Clone)]
pub struct PgStore {
    db_pool: PgPool,
}

impl PgStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<UserId, StoreError> {
        // Uniqueness is left to the users_username_key constraint; a separate
        // SELECT first would race with concurrent registrations.
        let id: UserId = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, StoreError> {
        sqlx::query_as(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl QuoteStore for PgStore {
    async fn insert(&self, owner_id: UserId, text: &str) -> Result<QuoteId, StoreError> {
        let id: QuoteId = sqlx::query_scalar(
            r#"
            INSERT INTO quotes (owner_id, text)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(owner_id)
        .bind(text)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(id)
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Quote>, StoreError> {
        let quotes = sqlx::query_as(
            r#"
            SELECT id, owner_id, text, created_at
            FROM quotes
            WHERE owner_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(quotes)
    }
}
