//! Authentication module for quotes-saver
//!
//! - Salted password hashing with bcrypt
//! - Stateless JWT issuance and verification
//! - Registration and login orchestration

mod jwt;
mod password;
mod service;

pub use jwt::{AuthenticatedUser, Claims, TokenError, TokenKeys};
pub use password::{PasswordError, PasswordHasher, MAX_PASSWORD_BYTES};
pub use service::{AuthError, AuthService};
