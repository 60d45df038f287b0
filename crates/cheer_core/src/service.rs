//! The assembled cheer service shared by the HTTP handlers

use crate::dispatcher::CheerDispatcher;
use crate::error::CheerServiceError;
use crate::queries::CheerQueries;
use crate::random::{RandomSource, ThreadRandom};
use crate::registry::InstallationRegistry;
use crate::responder::CheerResponder;
use crate::sampler::CountSkipSampler;
use crate::store::CheerStore;
use cheer_common::PushService;
use cheer_config::{CheerConfig, Environment};
use std::sync::Arc;

pub struct CheerService<S, P> {
    store: S,
    environment: Environment,
    registry: InstallationRegistry<S>,
    dispatcher: CheerDispatcher<S, CountSkipSampler<S>, P>,
    responder: CheerResponder<S, P>,
    queries: CheerQueries<S>,
}

impl<S, P> CheerService<S, P>
where
    S: CheerStore,
    P: PushService + Clone + 'static,
{
    pub fn new(store: S, push: P, config: Arc<CheerConfig>) -> Self {
        Self::with_random(store, push, config, Arc::new(ThreadRandom))
    }

    pub fn with_random(
        store: S,
        push: P,
        config: Arc<CheerConfig>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let sampler = CountSkipSampler::new(store.clone(), random.clone());

        Self {
            environment: config.environment,
            registry: InstallationRegistry::new(store.clone(), config.clone()),
            dispatcher: CheerDispatcher::new(
                store.clone(),
                sampler,
                push.clone(),
                config.clone(),
                random.clone(),
            ),
            responder: CheerResponder::new(store.clone(), push, config, random),
            queries: CheerQueries::new(store.clone()),
            store,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn registry(&self) -> &InstallationRegistry<S> {
        &self.registry
    }

    pub fn dispatcher(&self) -> &CheerDispatcher<S, CountSkipSampler<S>, P> {
        &self.dispatcher
    }

    pub fn responder(&self) -> &CheerResponder<S, P> {
        &self.responder
    }

    pub fn queries(&self) -> &CheerQueries<S> {
        &self.queries
    }

    /// Probe the store by reading this environment's installation counter
    pub async fn installation_count(&self) -> Result<i64, CheerServiceError> {
        self.store
            .get_count()
            .await?
            .ok_or(CheerServiceError::CounterUnavailable)
    }
}
