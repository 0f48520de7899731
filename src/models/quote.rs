//! Quote request and response bodies

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_no_nul, Quote, QuoteId};

/// Request body for `POST /quotes`
///
/// Older clients send the field as `quote`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    #[serde(alias = "quote")]
    #[validate(
        length(min = 1, message = "quote text must not be empty"),
        custom = "validate_no_nul"
    )]
    pub text: String,
}

/// Response for a created quote
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateQuoteResponse {
    pub id: QuoteId,
}

/// One entry of `GET /quotes`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QuoteResponse {
    pub id: QuoteId,
    pub text: String,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id,
            text: quote.text,
        }
    }
}
