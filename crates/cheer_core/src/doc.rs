#![allow(dead_code)]
//! OpenAPI document for the cheer routes
//!
//! The handlers are generic over the store and push service, so their paths are
//! documented on the stand-in functions below.

use utoipa::OpenApi;

use crate::handlers::{FunctionResult, HealthResponse, RegisterInstallationResponse};
use crate::params::FunctionParams;
use crate::queries::SubmitFeedback;
use crate::registry::RegisterInstallation;
use cheer_db::{Cheer, Feedback};

#[utoipa::path(
    post,
    path = "/functions/sendRandomCheer",
    request_body(content = FunctionParams, example = json!({
        "fromUserId": "u-8f2c",
        "fromInstallationId": "A1",
        "fromName": "Comet",
        "fromLocation": "Reykjavik"
    })),
    responses(
        (status = 200, description = "Cheer sent", body = FunctionResult,
         example = json!({ "result": "SUCCESS" })),
        (status = 400, description = "Missing parameter",
         example = json!({ "error": { "message": "Validation error: missing parameter: fromName", "code": 400 } })),
        (status = 502, description = "Push delivery failed"),
        (status = 503, description = "No other installation to cheer",
         example = json!({ "error": { "message": "Unavailable: No installation found", "code": 503 } }))
    ),
    tag = "Cheer"
)]
fn doc_send_random_cheer() {}

#[utoipa::path(
    post,
    path = "/functions/returnCheer",
    request_body(content = FunctionParams, example = json!({
        "originalNoteId": "0b1c4a9e-5d55-4f0e-9f55-0f1d8b3ef8a1",
        "fromUserId": "u-31aa",
        "fromInstallationId": "B1",
        "fromName": "Vixen",
        "fromLocation": "Tromso"
    })),
    responses(
        (status = 200, description = "Cheer returned", body = FunctionResult),
        (status = 400, description = "Missing parameter"),
        (status = 404, description = "Original cheer not found"),
        (status = 502, description = "Push delivery failed")
    ),
    tag = "Cheer"
)]
fn doc_return_cheer() {}

#[utoipa::path(
    post,
    path = "/installations",
    request_body = RegisterInstallation,
    responses(
        (status = 200, description = "Installation saved", body = RegisterInstallationResponse),
        (status = 400, description = "Invalid installation")
    ),
    tag = "Installations"
)]
fn doc_register_installation() {}

#[utoipa::path(
    get,
    path = "/installations/{installationId}/cheers",
    params(("installationId" = String, Path, description = "Recipient installation")),
    responses((status = 200, description = "Cheers received, newest first", body = [Cheer])),
    tag = "Cheers"
)]
fn doc_list_received_cheers() {}

#[utoipa::path(
    get,
    path = "/cheers/{id}",
    params(("id" = String, Path, description = "Cheer id")),
    responses(
        (status = 200, description = "The cheer", body = Cheer),
        (status = 404, description = "No such cheer")
    ),
    tag = "Cheers"
)]
fn doc_get_cheer() {}

#[utoipa::path(
    post,
    path = "/feedback",
    request_body = SubmitFeedback,
    responses(
        (status = 201, description = "Feedback stored", body = Feedback),
        (status = 400, description = "Empty feedback")
    ),
    tag = "Feedback"
)]
fn doc_submit_feedback() {}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store reachable", body = HealthResponse),
        (status = 503, description = "Store unavailable")
    ),
    tag = "Health"
)]
fn doc_health() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_send_random_cheer,
        doc_return_cheer,
        doc_register_installation,
        doc_list_received_cheers,
        doc_get_cheer,
        doc_submit_feedback,
        doc_health,
    ),
    components(schemas(
        FunctionParams,
        FunctionResult,
        RegisterInstallation,
        RegisterInstallationResponse,
        SubmitFeedback,
        HealthResponse,
        Cheer,
        Feedback,
    )),
    tags(
        (name = "Cheer", description = "Send and return Christmas cheer"),
        (name = "Installations", description = "Device registration"),
        (name = "Cheers", description = "Stored cheers"),
        (name = "Feedback", description = "App feedback"),
        (name = "Health", description = "Service health")
    ),
    servers(
        (url = "/api", description = "Christmas Cheer API server")
    )
)]
pub struct CheerApiDoc;
