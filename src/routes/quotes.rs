//! Quote routes

use axum::{routing::get, Router};

use crate::handlers::quotes;
use crate::state::AppState;

/// Create quote routes
pub fn quote_routes() -> Router<AppState> {
    Router::new().route("/quotes", get(quotes::list_quotes).post(quotes::add_quote))
}
