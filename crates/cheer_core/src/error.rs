//! Error types for the cheer pipeline

use cheer_common::CheerError;
use cheer_db::DbError;
use thiserror::Error;

/// Failures of the cheer operations
#[derive(Error, Debug)]
pub enum CheerServiceError {
    /// The sender is on the ban list; callers answer with the inert success instead
    #[error("Sender {0} is banned")]
    BannedSender(String),

    /// No other installation could be selected as recipient
    #[error("No installation found")]
    NoInstallationFound,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Push delivery failure: {0}")]
    PushDeliveryFailure(String),

    /// The installation counter record for this environment does not exist
    #[error("Installation counter unavailable")]
    CounterUnavailable,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<DbError> for CheerServiceError {
    fn from(err: DbError) -> Self {
        CheerServiceError::PersistenceFailure(err.to_string())
    }
}

impl From<CheerServiceError> for CheerError {
    fn from(err: CheerServiceError) -> Self {
        match err {
            CheerServiceError::NoInstallationFound => CheerError::UnavailableError(err.to_string()),
            CheerServiceError::NotFound(msg) => CheerError::NotFoundError(msg),
            CheerServiceError::InvalidRequest(msg) => CheerError::ValidationError(msg),
            CheerServiceError::PushDeliveryFailure(msg) => CheerError::ExternalServiceError {
                service_name: "push".to_string(),
                message: msg,
            },
            CheerServiceError::PersistenceFailure(msg) => CheerError::DatabaseError(msg),
            CheerServiceError::BannedSender(_) | CheerServiceError::CounterUnavailable => {
                CheerError::InternalError(err.to_string())
            }
        }
    }
}
