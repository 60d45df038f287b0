//! Error types for push delivery

use cheer_common::CheerError;
use cheer_db::DbError;
use thiserror::Error;

/// Errors that can occur while delivering a push
#[derive(Error, Debug)]
pub enum PushError {
    /// Error during authentication with Firebase
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to Firebase API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error returned by the Firebase API
    #[error("Firebase API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// No installation is registered under the target id
    #[error("Unknown installation: {0}")]
    UnknownInstallation(String),

    /// The installation exists but never supplied a device token
    #[error("Installation {0} has no device token")]
    MissingDeviceToken(String),

    /// Looking up the target installation failed
    #[error("Installation lookup failed: {0}")]
    StoreError(#[from] DbError),
}

impl From<PushError> for CheerError {
    fn from(err: PushError) -> Self {
        match err {
            PushError::ConfigError(msg) => CheerError::ConfigError(msg),
            other => CheerError::ExternalServiceError {
                service_name: "push".to_string(),
                message: other.to_string(),
            },
        }
    }
}
