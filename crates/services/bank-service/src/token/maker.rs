//! Token maker contract.

use chrono::Duration;
use thiserror::Error;

use common::AppError;

use super::Payload;

/// Errors raised while building a maker or handling tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Symmetric key is malformed or has an unsupported length
    #[error("invalid key size: must be exactly {expected} characters, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    #[error("token has expired")]
    Expired,

    #[error("token is invalid")]
    Invalid,

    #[error("cannot encode token: {0}")]
    Encoding(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid => AppError::Unauthorized,
            other => AppError::internal(other.to_string()),
        }
    }
}

/// Issues and verifies identity tokens.
///
/// Implementations are immutable after construction and safe to share
/// across any number of concurrent handlers.
pub trait TokenMaker: Send + Sync {
    /// Create a token for `username` valid for `duration`.
    fn create_token(&self, username: &str, duration: Duration) -> Result<(String, Payload), TokenError>;

    /// Check a token and return its payload.
    fn verify_token(&self, token: &str) -> Result<Payload, TokenError>;
}
