//! Quote HTTP handlers
//!
//! Both routes require a bearer token; the owner comes from the token only.

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::middleware::ValidatedJson;
use crate::models::{CreateQuoteRequest, CreateQuoteResponse, QuoteResponse};
use crate::state::AppState;

/// POST /quotes - Save a quote for the caller
pub async fn add_quote(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(req): ValidatedJson<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<CreateQuoteResponse>), ApiError> {
    let id = state.quote_service.add_quote_for(&user, &req.text).await?;

    Ok((StatusCode::CREATED, Json(CreateQuoteResponse { id })))
}

/// GET /quotes - List the caller's quotes
pub async fn list_quotes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<QuoteResponse>>, ApiError> {
    let quotes = state.quote_service.list_quotes_for(&user).await?;

    Ok(Json(quotes.into_iter().map(QuoteResponse::from).collect()))
}
