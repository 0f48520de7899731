//! Middleware for the quotes-saver API
//!
//! Request tracing, security headers, bearer-token authentication and
//! validated request bodies.

pub mod auth;
mod security;
mod tracing;
mod validation;

pub use security::security_headers;
pub use tracing::request_tracing;
pub use validation::ValidatedJson;
