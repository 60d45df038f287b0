use axum::{
    routing::{get, post},
    Router,
};
use cheer_common::PushService;
use std::sync::Arc;
use tracing::info;

use crate::handlers::{
    get_cheer_handler, health_handler, list_received_cheers_handler,
    register_installation_handler, return_cheer_handler, send_random_cheer_handler,
    submit_feedback_handler,
};
use crate::service::CheerService;
use crate::store::CheerStore;

/// Create the cheer API router
///
/// The backend nests it under `/api`.
pub fn routes<S, P>(service: CheerService<S, P>) -> Router
where
    S: CheerStore,
    P: PushService + Clone + 'static,
{
    info!(
        "Cheer routes initialized for environment: {}",
        service.environment()
    );

    Router::new()
        .route(
            "/functions/sendRandomCheer",
            post(send_random_cheer_handler::<S, P>),
        )
        .route("/functions/returnCheer", post(return_cheer_handler::<S, P>))
        .route("/installations", post(register_installation_handler::<S, P>))
        .route(
            "/installations/{installationId}/cheers",
            get(list_received_cheers_handler::<S, P>),
        )
        .route("/cheers/{id}", get(get_cheer_handler::<S, P>))
        .route("/feedback", post(submit_feedback_handler::<S, P>))
        .route("/health", get(health_handler::<S, P>))
        .with_state(Arc::new(service))
}
