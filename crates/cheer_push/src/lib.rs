//! Push delivery for the Christmas Cheer service
//!
//! Implements [`cheer_common::PushService`] on top of the Firebase Cloud Messaging
//! HTTP v1 API, plus a log-only sender for running without Firebase.
//!
//! # Example
//!
//! ```rust,no_run
//! use cheer_config::FirebaseConfig;
//! use cheer_db::SqlStore;
//! use cheer_push::{FcmPushService, FirebaseClient, PushError};
//!
//! fn push_service(config: &FirebaseConfig, store: SqlStore) -> Result<FcmPushService<SqlStore>, PushError> {
//!     let client = FirebaseClient::from_config(config)?;
//!     Ok(FcmPushService::new(client, store))
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod service;

pub use auth::{ServiceAccountTokenSource, StaticTokenSource, TokenSource};
pub use client::{FcmMessage, FirebaseClient};
pub use error::PushError;
pub use service::{FcmPushService, LogPushService};
