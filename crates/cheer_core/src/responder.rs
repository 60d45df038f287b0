//! Returning a received cheer to its sender

use crate::error::CheerServiceError;
use crate::notification::{cheer_push, random_sound};
use crate::params::ReturnCheerInput;
use crate::random::RandomSource;
use cheer_common::PushService;
use cheer_config::CheerConfig;
use cheer_db::{CheerRepository, NewCheer};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct CheerResponder<S, P> {
    store: S,
    push: P,
    config: Arc<CheerConfig>,
    random: Arc<dyn RandomSource>,
}

impl<S, P> CheerResponder<S, P>
where
    S: CheerRepository + Send + Sync,
    P: PushService,
{
    pub fn new(store: S, push: P, config: Arc<CheerConfig>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            store,
            push,
            config,
            random,
        }
    }

    /// Answer the cheer `input.original_note_id` with a cheer back to its sender
    ///
    /// A cheer that was already answered can be answered again; each call stores
    /// another response.
    pub async fn return_cheer(&self, input: ReturnCheerInput) -> Result<String, CheerServiceError> {
        let ReturnCheerInput {
            original_note_id,
            sender,
        } = input;

        let original = self
            .store
            .find_cheer(&original_note_id)
            .await?
            .ok_or_else(|| CheerServiceError::NotFound(format!("cheer {}", original_note_id)))?;

        if original.has_been_responded_to {
            debug!("Cheer {} is being returned again", original.id);
        }

        let marked = self.store.mark_responded(&original.id).await.map_err(|e| {
            error!("Failed to mark cheer {} as responded: {}", original.id, e);
            CheerServiceError::from(e)
        })?;
        if !marked {
            return Err(CheerServiceError::NotFound(format!("cheer {}", original.id)));
        }

        let message = format!(
            "{} from {} returned your Christmas cheer!{}",
            sender.from_name,
            sender.from_location,
            self.config.environment.message_suffix()
        );

        let response = self
            .store
            .create_cheer(NewCheer {
                from_user_id: sender.from_user_id,
                from_name: sender.from_name,
                from_installation_id: sender.from_installation_id,
                from_location: sender.from_location,
                to_installation_id: original.from_installation_id,
                message,
                has_been_responded_to: true,
                initiation_note_id: Some(original.id),
            })
            .await
            .map_err(|e| {
                error!("Failed to store response cheer: {}", e);
                CheerServiceError::from(e)
            })?;

        let request = cheer_push(&response, random_sound(self.random.as_ref()));
        self.push.send(request).await.map_err(|e| {
            error!(
                "FAILURE to send push from installation id: {} to id: {} for original note id: {}: {}",
                response.from_installation_id, response.to_installation_id, original_note_id, e
            );
            CheerServiceError::PushDeliveryFailure(e.to_string())
        })?;

        let result = format!(
            "Succesfully returned christmas cheer push from installation id: {} to installationId:{}",
            response.from_installation_id, response.to_installation_id
        );
        info!("{}", result);
        Ok(result)
    }
}
