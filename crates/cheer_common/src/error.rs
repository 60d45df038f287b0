// --- File: crates/cheer_common/src/error.rs ---
use thiserror::Error;

/// The base error type for all Christmas Cheer errors.
///
/// Each crate keeps its own error enum and implements `From<SpecificError> for CheerError`
/// so handlers can answer with a consistent JSON error body.
#[derive(Error, Debug)]
pub enum CheerError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The request is valid but cannot be served right now; the client may try again later
    #[error("Unavailable: {0}")]
    UnavailableError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for CheerError {
    fn status_code(&self) -> u16 {
        match self {
            CheerError::ConfigError(_) => 500,
            CheerError::ValidationError(_) => 400,
            CheerError::DatabaseError(_) => 500,
            CheerError::ExternalServiceError { .. } => 502,
            CheerError::NotFoundError(_) => 404,
            CheerError::UnavailableError(_) => 503,
            CheerError::InternalError(_) => 500,
        }
    }
}
