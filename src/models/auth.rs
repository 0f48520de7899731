//! Authentication models for quotes-saver

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_no_nul;

/// Longest username the `users.username` column accepts
pub const MAX_USERNAME_LEN: usize = 100;

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Request body for `POST /register`
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 100, message = "username must be 1 to 100 characters"),
        custom = "validate_no_nul"
    )]
    pub username: String,
    /// Registration refuses passwords over 72 bytes, the most bcrypt reads
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Request body for `POST /login`
///
/// Lengths are not validated here so that malformed credentials fail the same
/// way as wrong ones.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Token issued on successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Generic confirmation body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
