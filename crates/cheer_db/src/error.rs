//! Error types for the database client

use cheer_common::CheerError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// A stored value could not be turned back into its model type
    #[error("Database decode error: {0}")]
    DecodeError(String),
}

impl From<DbError> for CheerError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConfigError(msg) | DbError::UrlError(msg) => CheerError::ConfigError(msg),
            other => CheerError::DatabaseError(other.to_string()),
        }
    }
}
