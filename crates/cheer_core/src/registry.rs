//! Installation registry
//!
//! Keeps the sampling index in step with installation registrations: every newly
//! registered installation whose app is accepted gets one [`InstallationRef`] and one
//! counter increment.
//!
//! [`InstallationRef`]: cheer_db::InstallationRef

use crate::error::CheerServiceError;
use cheer_config::CheerConfig;
use cheer_db::{
    CounterRepository, Installation, InstallationRefRepository, InstallationRepository,
    SavedInstallation,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Fields a client supplies when registering
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInstallation {
    pub installation_id: String,
    pub app_name: Option<String>,
    pub app_identifier: Option<String>,
    pub device_token: Option<String>,
}

#[derive(Clone)]
pub struct InstallationRegistry<S> {
    store: S,
    config: Arc<CheerConfig>,
}

impl<S> InstallationRegistry<S>
where
    S: InstallationRepository + InstallationRefRepository + CounterRepository + Send + Sync,
{
    pub fn new(store: S, config: Arc<CheerConfig>) -> Self {
        Self { store, config }
    }

    /// Upsert an installation, then run the after-save hook
    ///
    /// Hook failures never fail the registration.
    pub async fn register_installation(
        &self,
        request: RegisterInstallation,
    ) -> Result<SavedInstallation, CheerServiceError> {
        if request.installation_id.trim().is_empty() {
            return Err(CheerServiceError::InvalidRequest(
                "installationId must not be empty".to_string(),
            ));
        }

        let saved = self
            .store
            .save_installation(Installation::new(
                request.installation_id,
                request.app_name,
                request.app_identifier,
                request.device_token,
            ))
            .await?;

        self.on_installation_saved(&saved.installation, saved.is_new_record)
            .await;
        Ok(saved)
    }

    /// After-save hook for installations
    pub async fn on_installation_saved(&self, installation: &Installation, is_new_record: bool) {
        let installation_id = installation.installation_id.as_str();

        if !is_new_record {
            debug!("Installation {} already existed, not indexing", installation_id);
            return;
        }

        if !self
            .config
            .accepts_app(installation.app_identifier.as_deref())
        {
            info!(
                "Installation {} has unaccepted app identifier {:?}, not indexing",
                installation_id, installation.app_identifier
            );
            return;
        }

        if let Err(e) = self.index_installation(installation).await {
            error!("Failed to index installation {}: {}", installation_id, e);
        }
    }

    async fn index_installation(&self, installation: &Installation) -> Result<(), CheerServiceError> {
        let installation_id = installation.installation_id.as_str();

        if self
            .store
            .find_ref_by_installation(installation_id)
            .await?
            .is_some()
        {
            debug!("Installation {} is already indexed", installation_id);
            return Ok(());
        }

        let created = self
            .store
            .create_ref(installation_id, installation.app_name.as_deref())
            .await?;

        match self.store.increment_count().await? {
            Some(count) => info!(
                "Indexed installation {} as ref {}, count is now {}",
                installation_id, created.id, count
            ),
            None => error!(
                "Indexed installation {} but the installation counter is missing",
                installation_id
            ),
        }
        Ok(())
    }
}
