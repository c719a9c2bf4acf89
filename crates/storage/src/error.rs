//! Storage error types.

use thiserror::Error;

/// Errors that can occur while opening or migrating the database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
