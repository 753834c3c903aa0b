//! Error types for salesboard-store

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Unexpected aggregation result: {message}")]
    UnexpectedResult { message: String },

    #[error("Store lock poisoned")]
    LockPoisoned,
}
