//! Random recipient selection
//!
//! The installation count is an approximate upper bound: refs are only ever added, and
//! the counter is bumped in a separate write after each ref. Selection therefore draws
//! an offset below `count - 1` and treats an empty page as "nobody found" rather than
//! retrying.

use crate::error::CheerServiceError;
use crate::random::RandomSource;
use cheer_db::{CounterRepository, InstallationRef, InstallationRefRepository};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Picks a recipient other than the caller
pub trait RecipientSampler: Send + Sync {
    /// Pick a random installation ref whose installation is not `excluding_installation_id`
    ///
    /// # Errors
    ///
    /// * `NoInstallationFound` when nobody else can be picked
    /// * `CounterUnavailable` when the installation counter does not exist
    fn pick_random_other_installation(
        &self,
        excluding_installation_id: &str,
    ) -> impl Future<Output = Result<InstallationRef, CheerServiceError>> + Send;
}

/// Counter-plus-offset sampler
#[derive(Clone)]
pub struct CountSkipSampler<S> {
    store: S,
    random: Arc<dyn RandomSource>,
}

impl<S> CountSkipSampler<S> {
    pub fn new(store: S, random: Arc<dyn RandomSource>) -> Self {
        Self { store, random }
    }
}

impl<S> RecipientSampler for CountSkipSampler<S>
where
    S: CounterRepository + InstallationRefRepository + Send + Sync,
{
    async fn pick_random_other_installation(
        &self,
        excluding_installation_id: &str,
    ) -> Result<InstallationRef, CheerServiceError> {
        let count = self
            .store
            .get_count()
            .await?
            .ok_or(CheerServiceError::CounterUnavailable)?;

        if count <= 1 {
            warn!("Only {} installation(s) registered, no one to cheer", count);
            return Err(CheerServiceError::NoInstallationFound);
        }

        // count >= 2 here, so the cast cannot wrap
        let max_count = (count - 1) as u64;
        let skip = self.random.below(max_count);
        debug!("Sampling recipient at offset {} of {}", skip, max_count);

        self.store
            .nth_ref_excluding(excluding_installation_id, skip)
            .await?
            .ok_or_else(|| {
                warn!("No installation ref at offset {}", skip);
                CheerServiceError::NoInstallationFound
            })
    }
}
