//! Error types for Shelf.

use thiserror::Error;

/// Common error type for Shelf.
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from any database backend.
    /// Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// A uniqueness constraint was violated (duplicate username or email).
    #[error("uniqueness conflict: {0}")]
    Conflict(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors. Unique-constraint violations are surfaced
// separately so the signup handler can re-render the form instead of 500ing.
impl From<sqlx::Error> for ShelfError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return ShelfError::Conflict(db_err.to_string());
            }
        }
        ShelfError::Database(e.to_string())
    }
}

/// Result type alias for Shelf operations.
pub type Result<T> = std::result::Result<T, ShelfError>;
