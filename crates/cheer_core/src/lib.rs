//! Christmas Cheer core
//!
//! Three cooperating parts make up the service:
//!
//! - [`InstallationRegistry`] indexes newly registered installations so a recipient can
//!   be drawn by random offset.
//! - [`CheerDispatcher`] sends a cheer to a random other installation.
//! - [`CheerResponder`] returns a received cheer to whoever sent it.
//!
//! [`routes`] exposes them, plus read routes and feedback, as an axum router.
//!
//! # Example
//!
//! ```rust,no_run
//! use cheer_common::PushService;
//! use cheer_config::AppConfig;
//! use cheer_core::{routes, CheerService};
//! use cheer_db::{DbClient, SqlStore};
//! use std::sync::Arc;
//!
//! async fn setup_app<P>(config: AppConfig, push: P) -> Result<axum::Router, Box<dyn std::error::Error>>
//! where
//!     P: PushService + Clone + 'static,
//! {
//!     let store = SqlStore::new(DbClient::new(&config).await?, config.cheer.environment);
//!     store.init_schema().await?;
//!     let service = CheerService::new(store, push, Arc::new(config.cheer));
//!     Ok(routes(service))
//! }
//! ```

pub mod dispatcher;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod handlers;
pub mod notification;
pub mod params;
pub mod queries;
pub mod random;
pub mod registry;
pub mod responder;
pub mod routes;
pub mod sampler;
pub mod service;
pub mod store;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
mod routes_test;

pub use dispatcher::{CheerDispatcher, BANNED_SENDER_RESULT, SEND_SUCCESS};
pub use error::CheerServiceError;
pub use random::{RandomSource, ThreadRandom};
pub use registry::{InstallationRegistry, RegisterInstallation};
pub use responder::CheerResponder;
pub use routes::routes;
pub use sampler::{CountSkipSampler, RecipientSampler};
pub use service::CheerService;
pub use store::CheerStore;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::CheerApiDoc;
}
