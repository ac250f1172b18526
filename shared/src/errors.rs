//! Error types for the product catalog

use thiserror::Error;

/// Store failures, independent of the backing driver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Authentication error types
///
/// The HTTP layer reports every token rejection as the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Access denied. No token provided.")]
    MissingToken,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signature mismatch")]
    BadSignature,

    #[error("Token expired")]
    TokenExpired,
}

impl AuthError {
    /// True for every failure produced by token verification
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedToken | AuthError::BadSignature | AuthError::TokenExpired
        )
    }
}
