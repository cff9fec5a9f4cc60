//! Common error types for the story service

use thiserror::Error;

use crate::store::StoreError;

/// Common result type for story service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the story service crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// List store could not complete the operation
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}
