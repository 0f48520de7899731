//! Route definitions for the quotes-saver API

mod auth;
mod quotes;

pub use auth::auth_routes;
pub use quotes::quote_routes;

use axum::{routing::get, Router};

use crate::handlers::{health_check, root};
use crate::middleware;
use crate::state::AppState;

/// Full application router with tracing and security headers applied.
/// CORS is layered on by the binary since it depends on deployment config.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(auth_routes())
        .merge(quote_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
}
