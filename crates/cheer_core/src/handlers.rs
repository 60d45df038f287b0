//! HTTP handlers for the cheer API
//!
//! The two cheer functions follow the cloud-function convention: the body is a flat
//! map of string parameters and a success answers `{"result": "..."}`. Failures render
//! through [`CheerError`] as `{"error": {"message", "code"}}`.

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use cheer_common::{CheerError, PushService};
use cheer_db::{Cheer, Feedback, SavedInstallation};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::params::{FunctionParams, ReturnCheerInput, Sender};
use crate::queries::SubmitFeedback;
use crate::registry::RegisterInstallation;
use crate::service::CheerService;
use crate::store::CheerStore;

/// Shared state of the cheer routes
pub type CheerState<S, P> = Arc<CheerService<S, P>>;

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct FunctionResult {
    pub result: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInstallationResponse {
    pub installation_id: String,
    pub is_new_record: bool,
}

impl From<SavedInstallation> for RegisterInstallationResponse {
    fn from(saved: SavedInstallation) -> Self {
        Self {
            installation_id: saved.installation.installation_id,
            is_new_record: saved.is_new_record,
        }
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub installations: i64,
}

pub async fn send_random_cheer_handler<S, P>(
    State(service): State<CheerState<S, P>>,
    Json(params): Json<FunctionParams>,
) -> Result<Json<FunctionResult>, CheerError>
where
    S: CheerStore,
    P: PushService + Clone + 'static,
{
    let sender = Sender::try_from(&params)?;
    debug!("sendRandomCheer from {}", sender.from_installation_id);

    let result = service.dispatcher().send_random_cheer(sender).await?;
    Ok(Json(FunctionResult { result }))
}

pub async fn return_cheer_handler<S, P>(
    State(service): State<CheerState<S, P>>,
    Json(params): Json<FunctionParams>,
) -> Result<Json<FunctionResult>, CheerError>
where
    S: CheerStore,
    P: PushService + Clone + 'static,
{
    let input = ReturnCheerInput::try_from(&params)?;
    debug!("returnCheer for note {}", input.original_note_id);

    let result = service.responder().return_cheer(input).await?;
    Ok(Json(FunctionResult { result }))
}

pub async fn register_installation_handler<S, P>(
    State(service): State<CheerState<S, P>>,
    Json(request): Json<RegisterInstallation>,
) -> Result<Json<RegisterInstallationResponse>, CheerError>
where
    S: CheerStore,
    P: PushService + Clone + 'static,
{
    let saved = service.registry().register_installation(request).await?;
    Ok(Json(saved.into()))
}

pub async fn list_received_cheers_handler<S, P>(
    State(service): State<CheerState<S, P>>,
    Path(installation_id): Path<String>,
) -> Result<Json<Vec<Cheer>>, CheerError>
where
    S: CheerStore,
    P: PushService + Clone + 'static,
{
    let cheers = service
        .queries()
        .list_received_cheers(&installation_id)
        .await?;
    Ok(Json(cheers))
}

pub async fn get_cheer_handler<S, P>(
    State(service): State<CheerState<S, P>>,
    Path(id): Path<String>,
) -> Result<Json<Cheer>, CheerError>
where
    S: CheerStore,
    P: PushService + Clone + 'static,
{
    Ok(Json(service.queries().get_cheer(&id).await?))
}

pub async fn submit_feedback_handler<S, P>(
    State(service): State<CheerState<S, P>>,
    Json(feedback): Json<SubmitFeedback>,
) -> Result<(StatusCode, Json<Feedback>), CheerError>
where
    S: CheerStore,
    P: PushService + Clone + 'static,
{
    let stored = service.queries().submit_feedback(feedback).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn health_handler<S, P>(
    State(service): State<CheerState<S, P>>,
) -> Result<Json<HealthResponse>, CheerError>
where
    S: CheerStore,
    P: PushService + Clone + 'static,
{
    let installations = service.installation_count().await.map_err(|e| {
        warn!("Health check failed: {}", e);
        CheerError::UnavailableError(e.to_string())
    })?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        environment: service.environment().to_string(),
        installations,
    }))
}
