//! Error types for Bibliotek

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Login or password did not check out. The message is identical for an
    /// unknown login and a wrong password.
    #[error("{0}")]
    Authentication(String),

    /// A field was rejected outside the prompt loop's own retry cycle.
    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A record collided with an existing one (duplicate login).
    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Single line shown at the terminal. Storage and internal details go to
    /// the log only; the operator gets a generic message.
    pub fn operator_line(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Storage error, nothing was saved.".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal error.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
