//! SQL implementation of the counter repository

use crate::error::DbError;
use crate::repositories::counter::CounterRepository;
use crate::repositories::sql_store::SqlStore;
use sqlx::Row;
use tracing::{debug, error};

impl CounterRepository for SqlStore {
    async fn get_count(&self) -> Result<Option<i64>, DbError> {
        debug!("Reading installation counter: {}", self.counter_id());

        let row = sqlx::query("SELECT count FROM counters WHERE id = $1")
            .bind(self.counter_id())
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to read installation counter: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        match row {
            Some(row) => Ok(Some(row.try_get::<i64, _>("count")?)),
            None => Ok(None),
        }
    }

    async fn increment_count(&self) -> Result<Option<i64>, DbError> {
        debug!("Incrementing installation counter: {}", self.counter_id());

        // single statement so concurrent increments never lose an update
        let row = sqlx::query(
            r#"
            UPDATE counters SET count = count + 1
            WHERE id = $1
            RETURNING count
            "#,
        )
        .bind(self.counter_id())
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to increment installation counter: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        match row {
            Some(row) => Ok(Some(row.try_get::<i64, _>("count")?)),
            None => Ok(None),
        }
    }
}
