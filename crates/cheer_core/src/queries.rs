//! Read routes and feedback

use crate::error::CheerServiceError;
use cheer_db::{Cheer, CheerRepository, Feedback, FeedbackRepository, NewFeedback};
use serde::Deserialize;
use tracing::{debug, info};

/// Most cheers returned by one listing
pub const RECEIVED_CHEERS_LIMIT: u32 = 1000;

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedback {
    pub text: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub installation_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location_description: String,
}

#[derive(Clone)]
pub struct CheerQueries<S> {
    store: S,
}

impl<S> CheerQueries<S>
where
    S: CheerRepository + FeedbackRepository + Send + Sync,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Cheers sent to `installation_id`, newest first
    pub async fn list_received_cheers(
        &self,
        installation_id: &str,
    ) -> Result<Vec<Cheer>, CheerServiceError> {
        debug!("Listing cheers received by {}", installation_id);
        Ok(self
            .store
            .find_cheers_to(installation_id, RECEIVED_CHEERS_LIMIT)
            .await?)
    }

    pub async fn get_cheer(&self, id: &str) -> Result<Cheer, CheerServiceError> {
        self.store
            .find_cheer(id)
            .await?
            .ok_or_else(|| CheerServiceError::NotFound(format!("cheer {}", id)))
    }

    pub async fn submit_feedback(
        &self,
        feedback: SubmitFeedback,
    ) -> Result<Feedback, CheerServiceError> {
        if feedback.text.trim().is_empty() {
            return Err(CheerServiceError::InvalidRequest(
                "feedback text must not be empty".to_string(),
            ));
        }

        let stored = self
            .store
            .create_feedback(NewFeedback {
                user_id: feedback.user_id,
                installation_id: feedback.installation_id,
                name: feedback.name,
                location_description: feedback.location_description,
                text: feedback.text,
            })
            .await?;

        info!("Feedback {} received", stored.id);
        Ok(stored)
    }
}
