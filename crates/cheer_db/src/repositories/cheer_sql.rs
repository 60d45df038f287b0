//! SQL implementation of the cheer repository

use crate::error::DbError;
use crate::models::{now, timestamp_from_text, timestamp_to_text, Cheer, NewCheer};
use crate::repositories::cheer::CheerRepository;
use crate::repositories::sql_store::{optional_text, SqlStore};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};
use uuid::Uuid;

const CHEER_COLUMNS: &str = "id, from_user_id, from_name, from_installation_id, from_location, \
     to_installation_id, message, has_been_responded_to, \
     COALESCE(initiation_note_id, '') AS initiation_note_id, created_at";

fn cheer_from_row(row: &AnyRow) -> Result<Cheer, DbError> {
    let created_at: String = row.try_get("created_at")?;
    let responded: i64 = row.try_get("has_been_responded_to")?;

    Ok(Cheer {
        id: row.try_get("id")?,
        from_user_id: row.try_get("from_user_id")?,
        from_name: row.try_get("from_name")?,
        from_installation_id: row.try_get("from_installation_id")?,
        from_location: row.try_get("from_location")?,
        to_installation_id: row.try_get("to_installation_id")?,
        message: row.try_get("message")?,
        has_been_responded_to: responded != 0,
        initiation_note_id: optional_text(row, "initiation_note_id")?,
        created_at: timestamp_from_text(&created_at)?,
    })
}

impl CheerRepository for SqlStore {
    async fn create_cheer(&self, cheer: NewCheer) -> Result<Cheer, DbError> {
        debug!(
            "Storing cheer from {} to {}",
            cheer.from_installation_id, cheer.to_installation_id
        );

        let created = Cheer {
            id: Uuid::new_v4().to_string(),
            from_user_id: cheer.from_user_id,
            from_name: cheer.from_name,
            from_installation_id: cheer.from_installation_id,
            from_location: cheer.from_location,
            to_installation_id: cheer.to_installation_id,
            message: cheer.message,
            has_been_responded_to: cheer.has_been_responded_to,
            initiation_note_id: cheer.initiation_note_id,
            created_at: now(),
        };

        sqlx::query(
            r#"
            INSERT INTO cheers
                (id, environment, from_user_id, from_name, from_installation_id, from_location,
                 to_installation_id, message, has_been_responded_to, initiation_note_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(created.id.clone())
        .bind(self.environment.as_str())
        .bind(created.from_user_id.clone())
        .bind(created.from_name.clone())
        .bind(created.from_installation_id.clone())
        .bind(created.from_location.clone())
        .bind(created.to_installation_id.clone())
        .bind(created.message.clone())
        .bind(i64::from(created.has_been_responded_to))
        .bind(created.initiation_note_id.clone())
        .bind(timestamp_to_text(&created.created_at))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to insert cheer: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        info!("Cheer stored: {}", created.id);
        Ok(created)
    }

    async fn find_cheer(&self, id: &str) -> Result<Option<Cheer>, DbError> {
        debug!("Finding cheer: {}", id);

        let query = format!(
            "SELECT {} FROM cheers WHERE environment = $1 AND id = $2",
            CHEER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(self.environment.as_str())
            .bind(id.to_string())
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find cheer: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row.as_ref().map(cheer_from_row).transpose()
    }

    async fn mark_responded(&self, id: &str) -> Result<bool, DbError> {
        debug!("Marking cheer as responded: {}", id);

        let result = sqlx::query(
            r#"
            UPDATE cheers SET has_been_responded_to = 1
            WHERE environment = $1 AND id = $2
            "#,
        )
        .bind(self.environment.as_str())
        .bind(id.to_string())
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to mark cheer as responded: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_cheers_to(
        &self,
        installation_id: &str,
        limit: u32,
    ) -> Result<Vec<Cheer>, DbError> {
        debug!("Listing cheers sent to: {}", installation_id);

        let query = format!(
            "SELECT {} FROM cheers WHERE environment = $1 AND to_installation_id = $2 \
             ORDER BY created_at DESC, seq DESC LIMIT $3",
            CHEER_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(self.environment.as_str())
            .bind(installation_id.to_string())
            .bind(i64::from(limit))
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list cheers: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(cheer_from_row).collect()
    }
}
