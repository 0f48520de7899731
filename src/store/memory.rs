//! In-process stores

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{CredentialStore, QuoteStore, StoreError};
use crate::models::{Quote, QuoteId, User, UserId};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    username_index: HashMap<String, usize>,
    quotes: Vec<Quote>,
}

/// Users and quotes held in memory. Ids start at 1 per table, like BIGSERIAL.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<UserId, StoreError> {
        // Check and insert under one guard
        let mut tables = self.lock()?;
        if tables.username_index.contains_key(username) {
            return Err(StoreError::AlreadyExists);
        }

        let id = UserId(tables.users.len() as i64 + 1);
        let position = tables.users.len();
        tables.users.push(User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        });
        tables.username_index.insert(username.to_string(), position);

        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, StoreError> {
        let tables = self.lock()?;
        tables
            .username_index
            .get(username)
            .and_then(|&position| tables.users.get(position))
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl QuoteStore for MemoryStore {
    async fn insert(&self, owner_id: UserId, text: &str) -> Result<QuoteId, StoreError> {
        let mut tables = self.lock()?;
        // Mirrors the quotes.owner_id foreign key
        if !tables.users.iter().any(|user| user.id == owner_id) {
            return Err(StoreError::NotFound);
        }

        let id = QuoteId(tables.quotes.len() as i64 + 1);
        tables.quotes.push(Quote {
            id,
            owner_id,
            text: text.to_string(),
            created_at: Utc::now(),
        });

        Ok(id)
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Quote>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .quotes
            .iter()
            .filter(|quote| quote.owner_id == owner_id)
            .cloned()
            .collect())
    }
}
