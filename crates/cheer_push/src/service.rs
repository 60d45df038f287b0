//! [`PushService`] implementations
//!
//! `FcmPushService` resolves the target installation's device token through the
//! installation repository and sends through FCM. `LogPushService` only logs, and
//! is what the backend wires in when Firebase is disabled.

use crate::client::{FcmMessage, FirebaseClient};
use crate::error::PushError;
use cheer_common::{BoxFuture, PushRequest, PushService};
use cheer_db::InstallationRepository;
use tracing::{debug, info, warn};

/// Delivers pushes through Firebase Cloud Messaging
#[derive(Debug, Clone)]
pub struct FcmPushService<I> {
    client: FirebaseClient,
    installations: I,
}

impl<I> FcmPushService<I>
where
    I: InstallationRepository + Send + Sync,
{
    pub fn new(client: FirebaseClient, installations: I) -> Self {
        Self {
            client,
            installations,
        }
    }

    async fn deliver(&self, request: PushRequest) -> Result<String, PushError> {
        let installation = self
            .installations
            .find_installation(&request.installation_id)
            .await?
            .ok_or_else(|| PushError::UnknownInstallation(request.installation_id.clone()))?;

        let device_token = installation
            .device_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                warn!(
                    "Installation {} has no device token, cannot push",
                    request.installation_id
                );
                PushError::MissingDeviceToken(request.installation_id.clone())
            })?;

        debug!("Sending push to installation {}", request.installation_id);
        let message = FcmMessage::from_payload(device_token, request.payload);
        let name = self.client.send_message(&message).await?;

        info!(
            "Push delivered to installation {}: {}",
            request.installation_id, name
        );
        Ok(name)
    }
}

impl<I> PushService for FcmPushService<I>
where
    I: InstallationRepository + Send + Sync,
{
    type Error = PushError;

    fn send(&self, request: PushRequest) -> BoxFuture<'_, String, Self::Error> {
        Box::pin(self.deliver(request))
    }
}

/// Dry-run push service that only logs what would have been sent
#[derive(Debug, Clone, Default)]
pub struct LogPushService;

impl LogPushService {
    pub fn new() -> Self {
        Self
    }
}

impl PushService for LogPushService {
    type Error = PushError;

    fn send(&self, request: PushRequest) -> BoxFuture<'_, String, Self::Error> {
        Box::pin(async move {
            info!(
                installation_id = %request.installation_id,
                title = %request.payload.title,
                body = %request.payload.body,
                sound = ?request.payload.sound,
                "Push delivery disabled, logging push instead"
            );
            Ok(format!("logged/{}", request.installation_id))
        })
    }
}
