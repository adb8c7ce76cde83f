//! Unified error handling for gRPC services.
//!
//! Store, token and task failures all surface as [`AppError`], which maps
//! onto a Tonic status without leaking internal details to the caller.

use thiserror::Error;
use tonic::Status;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing, expired or forged credentials
    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource not found")]
    NotFound,

    /// Unique key already taken; holds the entity name
    #[error("{0} already exists")]
    Conflict(String),

    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Message safe to return to a client.
    ///
    /// Database and internal failures are logged here and replaced by a
    /// generic message.
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database error");
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        let code = match &err {
            AppError::Unauthorized => tonic::Code::Unauthenticated,
            AppError::NotFound => tonic::Code::NotFound,
            AppError::Conflict(_) => tonic::Code::AlreadyExists,
            _ => tonic::Code::Internal,
        };

        Status::new(code, err.user_message())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Turns an empty lookup into [`AppError::NotFound`].
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}
