//! Object store for the Christmas Cheer service
//!
//! Persists installations, installation refs, the installation counter, cheers and
//! feedback through SQLx's `Any` driver. Every record is namespaced by the
//! [`cheer_config::Environment`] the store was created for.
//!
//! # Example
//!
//! ```rust,no_run
//! use cheer_config::Environment;
//! use cheer_db::{DbClient, SqlStore};
//!
//! async fn setup_store() -> Result<SqlStore, Box<dyn std::error::Error>> {
//!     let db_client = DbClient::from_url("sqlite::memory:").await?;
//!     let store = SqlStore::new(db_client, Environment::Development);
//!     store.init_schema().await?;
//!     Ok(store)
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod repositories;
pub mod repository;

pub use client::DbClient;
pub use error::DbError;
pub use models::{
    Cheer, Feedback, Installation, InstallationRef, NewCheer, NewFeedback, SavedInstallation,
};
pub use repository::RepositoryFactory;

pub use repositories::{
    CheerRepository, CounterRepository, FeedbackRepository, InstallationRefRepository,
    InstallationRepository, SqlStore, SqlStoreFactory,
};
