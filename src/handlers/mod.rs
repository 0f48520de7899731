//! API handlers for quotes-saver

pub mod auth;
pub mod health;
pub mod quotes;

pub use auth::{login, register};
pub use health::{health_check, root};
pub use quotes::{add_quote, list_quotes};
