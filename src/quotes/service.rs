//! Quote service
//!
//! Every operation is scoped to an [`AuthenticatedUser`]; the owner id used
//! for reads and writes always comes from the verified token.

use std::sync::Arc;

use thiserror::Error;

use crate::auth::{AuthenticatedUser, TokenError, TokenKeys};
use crate::models::{Quote, QuoteId};
use crate::store::{QuoteStore, StoreError};

/// Quote service errors
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] TokenError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Quote service
#[derive(Clone)]
pub struct QuoteService {
    quotes: Arc<dyn QuoteStore>,
    tokens: Arc<TokenKeys>,
}

impl QuoteService {
    pub fn new(quotes: Arc<dyn QuoteStore>, tokens: Arc<TokenKeys>) -> Self {
        Self { quotes, tokens }
    }

    /// Verify `token`, then store `text` for its owner
    pub async fn add_quote(&self, token: &str, text: &str) -> Result<QuoteId, QuoteError> {
        let user = self.tokens.verify(token)?;
        self.add_quote_for(&user, text).await
    }

    /// Verify `token`, then list its owner's quotes
    pub async fn list_quotes(&self, token: &str) -> Result<Vec<Quote>, QuoteError> {
        let user = self.tokens.verify(token)?;
        self.list_quotes_for(&user).await
    }

    /// Store a quote for an already verified user
    pub async fn add_quote_for(
        &self,
        user: &AuthenticatedUser,
        text: &str,
    ) -> Result<QuoteId, QuoteError> {
        if text.is_empty() {
            return Err(QuoteError::InvalidInput(
                "quote text must not be empty".to_string(),
            ));
        }
        if text.contains('\0') {
            return Err(QuoteError::InvalidInput(
                "quote text must not contain NUL characters".to_string(),
            ));
        }

        let quote_id = self
            .quotes
            .insert(user.user_id(), text)
            .await
            .map_err(|e| match e {
                // Token outlived its account
                StoreError::NotFound => {
                    QuoteError::Unauthorized(TokenError::Invalid("unknown user".to_string()))
                }
                other => QuoteError::Internal(other.to_string()),
            })?;

        tracing::debug!(user_id = %user.user_id(), quote_id = %quote_id, "Quote added");
        Ok(quote_id)
    }

    /// Quotes owned by an already verified user, oldest first
    pub async fn list_quotes_for(&self, user: &AuthenticatedUser) -> Result<Vec<Quote>, QuoteError> {
        self.quotes
            .list_by_owner(user.user_id())
            .await
            .map_err(|e| QuoteError::Internal(e.to_string()))
    }
}
