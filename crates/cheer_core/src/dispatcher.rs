//! Sending a cheer to a random stranger

use crate::error::CheerServiceError;
use crate::notification::{cheer_push, random_sound};
use crate::params::Sender;
use crate::random::RandomSource;
use crate::sampler::RecipientSampler;
use cheer_common::PushService;
use cheer_config::CheerConfig;
use cheer_db::{CheerRepository, NewCheer};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const SEND_SUCCESS: &str = "SUCCESS";

/// What a banned sender is told; nothing is stored or pushed
pub const BANNED_SENDER_RESULT: &str = "Whatever bro, Imma pretend you're doing something.";

#[derive(Clone)]
pub struct CheerDispatcher<S, R, P> {
    store: S,
    sampler: R,
    push: P,
    config: Arc<CheerConfig>,
    random: Arc<dyn RandomSource>,
}

impl<S, R, P> CheerDispatcher<S, R, P>
where
    S: CheerRepository + Send + Sync,
    R: RecipientSampler,
    P: PushService,
{
    pub fn new(
        store: S,
        sampler: R,
        push: P,
        config: Arc<CheerConfig>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            store,
            sampler,
            push,
            config,
            random,
        }
    }

    /// Send a cheer from `sender` to a randomly picked other installation
    ///
    /// # Returns
    ///
    /// [`SEND_SUCCESS`] once the cheer is stored and pushed, or
    /// [`BANNED_SENDER_RESULT`] for a banned sender
    pub async fn send_random_cheer(&self, sender: Sender) -> Result<String, CheerServiceError> {
        match self.dispatch(sender).await {
            Err(CheerServiceError::BannedSender(installation_id)) => {
                warn!("Ignoring cheer from banned installation {}", installation_id);
                Ok(BANNED_SENDER_RESULT.to_string())
            }
            other => other,
        }
    }

    async fn dispatch(&self, sender: Sender) -> Result<String, CheerServiceError> {
        if self.config.is_banned(&sender.from_installation_id) {
            return Err(CheerServiceError::BannedSender(sender.from_installation_id));
        }

        let message = format!(
            "{} sent you some Christmas cheer from {}{}",
            sender.from_name,
            sender.from_location,
            self.config.environment.message_suffix()
        );

        let recipient = self
            .sampler
            .pick_random_other_installation(&sender.from_installation_id)
            .await?;
        debug!(
            "Picked installation {} for cheer from {}",
            recipient.installation_id, sender.from_installation_id
        );

        let cheer = self
            .store
            .create_cheer(NewCheer {
                from_user_id: sender.from_user_id,
                from_name: sender.from_name,
                from_installation_id: sender.from_installation_id,
                from_location: sender.from_location,
                to_installation_id: recipient.installation_id,
                message,
                has_been_responded_to: false,
                initiation_note_id: None,
            })
            .await
            .map_err(|e| {
                error!("Failed to store cheer: {}", e);
                CheerServiceError::from(e)
            })?;

        let request = cheer_push(&cheer, random_sound(self.random.as_ref()));
        self.push.send(request).await.map_err(|e| {
            error!(
                "FAILURE to send push from installation id: {} to id: {}: {}",
                cheer.from_installation_id, cheer.to_installation_id, e
            );
            CheerServiceError::PushDeliveryFailure(e.to_string())
        })?;

        info!(
            "Sent christmas cheer {} from installation id: {} to installation id: {}",
            cheer.id, cheer.from_installation_id, cheer.to_installation_id
        );
        Ok(SEND_SUCCESS.to_string())
    }
}
