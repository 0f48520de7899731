//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::{AuthService, PasswordHasher, TokenKeys};
use crate::db::Database;
use crate::quotes::QuoteService;
use crate::store::{CredentialStore, QuoteStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub quote_service: Arc<QuoteService>,
    pub tokens: Arc<TokenKeys>,
    /// `None` when running on the in-memory stores
    pub database: Option<Database>,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        quote_service: Arc<QuoteService>,
        tokens: Arc<TokenKeys>,
        database: Option<Database>,
    ) -> Self {
        Self {
            auth_service,
            quote_service,
            tokens,
            database,
        }
    }

    /// Wire both gateways over the given stores
    pub fn from_stores(
        credentials: Arc<dyn CredentialStore>,
        quotes: Arc<dyn QuoteStore>,
        hasher: PasswordHasher,
        tokens: Arc<TokenKeys>,
        database: Option<Database>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(credentials, hasher, tokens.clone()));
        let quote_service = Arc::new(QuoteService::new(quotes, tokens.clone()));
        Self::new(auth_service, quote_service, tokens, database)
    }
}

/// Lets the bearer-token extractor reach the keys without the whole state
impl FromRef<AppState> for Arc<TokenKeys> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}
