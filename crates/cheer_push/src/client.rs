//! Firebase Cloud Messaging client
//!
//! Wraps the FCM HTTP v1 `messages:send` endpoint. A client is bound to one project
//! and a [`TokenSource`] that supplies the bearer token for every request.

use crate::auth::{ServiceAccountTokenSource, TokenSource};
use crate::error::PushError;
use cheer_common::{create_client, PushPayload};
use cheer_config::FirebaseConfig;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// Public FCM endpoint
pub const DEFAULT_FCM_BASE_URL: &str = "https://fcm.googleapis.com";

const FCM_TIMEOUT_SECS: u64 = 10;

/// Top-level FCM request body
#[derive(Debug, Serialize)]
pub struct FcmMessage {
    pub message: Message,
}

#[derive(Debug, Serialize)]
pub struct Message {
    /// Registration token of the target device
    pub token: String,
    pub notification: Notification,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub data: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apns: Option<ApnsConfig>,
}

#[derive(Debug, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct ApnsConfig {
    pub payload: ApnsPayload,
}

#[derive(Debug, Serialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Serialize)]
pub struct Aps {
    pub sound: String,
}

impl FcmMessage {
    /// Build the FCM message delivering `payload` to `device_token`
    ///
    /// The badge instruction travels in the data map under `badge`; FCM only accepts a
    /// numeric APNs badge and the increment is applied on the device.
    pub fn from_payload(device_token: String, payload: PushPayload) -> Self {
        let mut data = payload.data;
        if let Some(badge) = payload.badge {
            data.insert("badge".to_string(), badge);
        }

        Self {
            message: Message {
                token: device_token,
                notification: Notification {
                    title: payload.title,
                    body: payload.body,
                },
                data,
                apns: payload.sound.map(|sound| ApnsConfig {
                    payload: ApnsPayload { aps: Aps { sound } },
                }),
            },
        }
    }
}

/// Successful response from `messages:send`
#[derive(Debug, Deserialize)]
pub struct FcmResponse {
    /// "projects/{project_id}/messages/{message_id}"
    pub name: String,
}

/// Client for the FCM HTTP v1 API
#[derive(Clone)]
pub struct FirebaseClient {
    client: Client,
    project_id: String,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for FirebaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseClient")
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl FirebaseClient {
    /// Create a client authenticating with the configured service account key
    ///
    /// # Errors
    ///
    /// `ConfigError` when `project_id` or `key_path` is missing.
    pub fn from_config(config: &FirebaseConfig) -> Result<Self, PushError> {
        let key_path = config.key_path.as_deref().ok_or_else(|| {
            PushError::ConfigError("Missing key_path in FirebaseConfig".to_string())
        })?;

        Self::with_token_source(config, Arc::new(ServiceAccountTokenSource::new(key_path)))
    }

    /// Create a client that takes its bearer tokens from `tokens`
    pub fn with_token_source(
        config: &FirebaseConfig,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, PushError> {
        let project_id = config.project_id.clone().ok_or_else(|| {
            PushError::ConfigError("Missing project_id in FirebaseConfig".to_string())
        })?;

        let base_url = config
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_FCM_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: create_client(FCM_TIMEOUT_SECS, false)?,
            project_id,
            base_url,
            tokens,
        })
    }

    pub fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.base_url, self.project_id
        )
    }

    /// Send one message
    ///
    /// # Returns
    ///
    /// The FCM message name on success
    pub async fn send_message(&self, message: &FcmMessage) -> Result<String, PushError> {
        let token = self.tokens.access_token().await?;
        let url = self.send_url();

        debug!("Posting FCM message to {}", url);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("FCM rejected message with status {}: {}", status, body);
            return Err(PushError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let fcm_response: FcmResponse = response.json().await?;
        Ok(fcm_response.name)
    }
}
