//! Access tokens for the FCM HTTP v1 API

use crate::error::PushError;
use cheer_common::BoxFuture;
use std::path::PathBuf;
use tokio::sync::OnceCell;
use tracing::debug;
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

/// OAuth2 scope required to send FCM messages
pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

/// Something that can hand out a bearer token for FCM requests
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> BoxFuture<'_, String, PushError>;
}

/// Obtains tokens with a Google service account key file
///
/// The authenticator is built once, on first use, and its token cache serves later pushes.
pub struct ServiceAccountTokenSource {
    key_path: PathBuf,
    authenticator: OnceCell<DefaultAuthenticator>,
}

impl std::fmt::Debug for ServiceAccountTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountTokenSource")
            .field("key_path", &self.key_path)
            .field("initialized", &self.authenticator.initialized())
            .finish()
    }
}

impl ServiceAccountTokenSource {
    pub fn new(key_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
            authenticator: OnceCell::new(),
        }
    }

    async fn build_authenticator(&self) -> Result<DefaultAuthenticator, PushError> {
        debug!("Building FCM authenticator with key {:?}", self.key_path);

        let sa_key = read_service_account_key(&self.key_path)
            .await
            .map_err(|e| PushError::AuthError(format!("cannot read service account key: {}", e)))?;

        ServiceAccountAuthenticator::builder(sa_key)
            .build()
            .await
            .map_err(|e| PushError::AuthError(e.to_string()))
    }

    async fn fetch_token(&self) -> Result<String, PushError> {
        let auth = self
            .authenticator
            .get_or_try_init(|| self.build_authenticator())
            .await?;

        let token = auth
            .token(&[FCM_SCOPE])
            .await
            .map_err(|e| PushError::AuthError(e.to_string()))?;

        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| PushError::AuthError("No token available".to_string()))
    }
}

impl TokenSource for ServiceAccountTokenSource {
    fn access_token(&self) -> BoxFuture<'_, String, PushError> {
        Box::pin(self.fetch_token())
    }
}

/// A fixed token, for local emulators and tests
#[derive(Debug, Clone)]
pub struct StaticTokenSource(String);

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenSource for StaticTokenSource {
    fn access_token(&self) -> BoxFuture<'_, String, PushError> {
        let token = self.0.clone();
        Box::pin(async move { Ok(token) })
    }
}
