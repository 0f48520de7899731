//! Quotes Saver Backend Library
//!
//! Users register and log in; each authenticated user stores and lists
//! private text quotes.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod quotes;
pub mod routes;
pub mod state;
pub mod store;
