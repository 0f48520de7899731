//! PostgreSQL pool lifecycle
//!
//! [`Database`] owns the connection pool from startup to shutdown: it connects
//! with the configured limits, applies the `users`/`quotes` migrations, answers
//! health checks and hands out [`PgStore`]s over the same pool.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;
use crate::store::PgStore;

/// Database lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    Connect(String),

    #[error("Failed to apply migrations: {0}")]
    Migrate(String),

    #[error("Database unreachable: {0}")]
    Unreachable(String),
}

/// Connection pool limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

impl From<&Config> for PoolSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_connections: config.db_max_connections,
            acquire_timeout: Duration::from_secs(config.db_acquire_timeout_seconds),
            idle_timeout: Duration::from_secs(config.db_idle_timeout_seconds),
        }
    }
}

/// Handle to the shared pool, cloned into application state
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open a pool against `url`. Fails if no connection can be made.
    pub async fn connect(url: &str, settings: &PoolSettings) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .idle_timeout(settings.idle_timeout)
            .connect(url)
            .await
            .map_err(|e| DbError::Connect(e.to_string()))?;

        tracing::info!(
            max_connections = settings.max_connections,
            "Database pool ready"
        );
        Ok(Self { pool })
    }

    /// Create the users and quotes tables if missing
    pub async fn migrate(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migrate(e.to_string()))?;

        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Credential and quote store over this pool
    pub fn store(&self) -> PgStore {
        PgStore::new(self.pool.clone())
    }

    /// Round-trip a trivial query
    pub async fn health(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Unreachable(e.to_string()))?;
        Ok(())
    }

    /// Close all connections; called once at shutdown
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
