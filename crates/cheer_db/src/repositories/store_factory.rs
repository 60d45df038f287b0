//! Factory for creating SQL stores

use crate::repositories::sql_store::SqlStore;
use crate::{DbClient, RepositoryFactory};
use cheer_config::Environment;

/// Creates [`SqlStore`]s bound to one environment
#[derive(Debug, Clone, Default)]
pub struct SqlStoreFactory {
    environment: Environment,
}

impl SqlStoreFactory {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }
}

impl RepositoryFactory<SqlStore, DbClient> for SqlStoreFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlStore {
        SqlStore::new(db_client, self.environment)
    }
}
