// File: services/cheer_backend/src/main.rs
mod service_factory;

use axum::{routing::get, Router};
use cheer_config::load_config;
use cheer_core::{routes as cheer_routes, CheerService};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::service_factory::{create_push_service, create_store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(load_config()?);
    // keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = cheer_common::init_with_config(&config.logging);

    info!(
        "Starting Christmas Cheer in {} environment",
        config.cheer.environment
    );

    let store = create_store(&config).await?;
    let push = create_push_service(&config, store.clone())?;
    let service = CheerService::new(store, push, Arc::new(config.cheer.clone()));

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Christmas Cheer API!" }))
        .merge(cheer_routes(service));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use cheer_core::openapi::CheerApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Christmas Cheer API",
                version = "0.1.0",
                description = "Send Christmas cheer to random strangers",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(CheerApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
