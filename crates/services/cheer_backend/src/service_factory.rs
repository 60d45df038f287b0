//! Builds the collaborators the cheer routes run on

use cheer_common::PushService;
use cheer_config::AppConfig;
use cheer_db::{DbClient, DbError, RepositoryFactory, SqlStore, SqlStoreFactory};
use cheer_push::{FcmPushService, FirebaseClient, LogPushService, PushError};
use std::sync::Arc;
use tracing::{info, warn};

/// The push service the backend runs with, chosen at startup
pub type SharedPushService = Arc<dyn PushService<Error = PushError>>;

/// Connect to the database and prepare the store for the configured environment
pub async fn create_store(config: &AppConfig) -> Result<SqlStore, DbError> {
    let db_client = DbClient::new(config).await?;
    let store = SqlStoreFactory::new(config.cheer.environment).create_repository(db_client);
    store.init_schema().await?;
    Ok(store)
}

/// FCM delivery when `use_firebase` is set, otherwise the log-only sender
///
/// # Errors
///
/// `ConfigError` when Firebase is enabled but not configured.
pub fn create_push_service(
    config: &AppConfig,
    store: SqlStore,
) -> Result<SharedPushService, PushError> {
    if !config.use_firebase {
        warn!("Firebase disabled, pushes will only be logged");
        return Ok(Arc::new(LogPushService::new()));
    }

    let firebase = config.firebase.as_ref().ok_or_else(|| {
        PushError::ConfigError("use_firebase is set but [firebase] is missing".to_string())
    })?;
    let client = FirebaseClient::from_config(firebase)?;

    info!("Pushes will be delivered through FCM: {}", client.send_url());
    Ok(Arc::new(FcmPushService::new(client, store)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cheer_config::{DatabaseConfig, FirebaseConfig};

    fn memory_config() -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: None,
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_store_is_ready_after_creation() {
        use cheer_db::CounterRepository;

        let store = create_store(&memory_config()).await.unwrap();
        assert_eq!(store.get_count().await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_firebase_enabled_without_section_is_config_error() {
        let mut config = memory_config();
        config.use_firebase = true;
        let store = create_store(&config).await.unwrap();

        let err = create_push_service(&config, store).err().unwrap();
        assert!(matches!(err, PushError::ConfigError(_)));
    }

    #[tokio::test]
    async fn test_firebase_disabled_uses_log_sender() {
        let mut config = memory_config();
        config.firebase = Some(FirebaseConfig::default());
        let store = create_store(&config).await.unwrap();

        assert!(create_push_service(&config, store).is_ok());
    }
}
