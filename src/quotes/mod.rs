//! Quote module
//!
//! Per-user quote storage behind token verification.

mod service;

pub use service::{QuoteError, QuoteService};
