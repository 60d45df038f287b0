//! SQL implementation of the installation ref repository

use crate::error::DbError;
use crate::models::{now, timestamp_from_text, timestamp_to_text, InstallationRef};
use crate::repositories::installation_ref::InstallationRefRepository;
use crate::repositories::sql_store::{optional_text, SqlStore};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};
use uuid::Uuid;

fn ref_from_row(row: &AnyRow) -> Result<InstallationRef, DbError> {
    let created_at: String = row.try_get("created_at")?;

    Ok(InstallationRef {
        id: row.try_get("id")?,
        installation_id: row.try_get("installation_id")?,
        app_name: optional_text(row, "app_name")?,
        created_at: timestamp_from_text(&created_at)?,
    })
}

impl InstallationRefRepository for SqlStore {
    async fn find_ref_by_installation(
        &self,
        installation_id: &str,
    ) -> Result<Option<InstallationRef>, DbError> {
        debug!("Finding installation ref for: {}", installation_id);

        let row = sqlx::query(
            r#"
            SELECT id, installation_id, COALESCE(app_name, '') AS app_name, created_at
            FROM installation_refs
            WHERE environment = $1 AND installation_id = $2
            ORDER BY created_at ASC, seq ASC
            LIMIT 1
            "#,
        )
        .bind(self.environment.as_str())
        .bind(installation_id.to_string())
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to find installation ref: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        row.as_ref().map(ref_from_row).transpose()
    }

    async fn create_ref(
        &self,
        installation_id: &str,
        app_name: Option<&str>,
    ) -> Result<InstallationRef, DbError> {
        debug!("Creating installation ref for: {}", installation_id);

        let created = InstallationRef {
            id: Uuid::new_v4().to_string(),
            installation_id: installation_id.to_string(),
            app_name: app_name.map(str::to_string),
            created_at: now(),
        };

        sqlx::query(
            r#"
            INSERT INTO installation_refs (id, environment, installation_id, app_name, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(created.id.clone())
        .bind(self.environment.as_str())
        .bind(created.installation_id.clone())
        .bind(created.app_name.clone())
        .bind(timestamp_to_text(&created.created_at))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to insert installation ref: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        info!("Installation ref created: {}", created.id);
        Ok(created)
    }

    async fn nth_ref_excluding(
        &self,
        excluding_installation_id: &str,
        skip: u64,
    ) -> Result<Option<InstallationRef>, DbError> {
        debug!(
            "Fetching installation ref at offset {} excluding: {}",
            skip, excluding_installation_id
        );

        let offset = i64::try_from(skip)
            .map_err(|_| DbError::QueryError(format!("offset out of range: {}", skip)))?;

        let row = sqlx::query(
            r#"
            SELECT id, installation_id, COALESCE(app_name, '') AS app_name, created_at
            FROM installation_refs
            WHERE environment = $1 AND installation_id <> $2
            ORDER BY created_at ASC, seq ASC
            LIMIT 1 OFFSET $3
            "#,
        )
        .bind(self.environment.as_str())
        .bind(excluding_installation_id.to_string())
        .bind(offset)
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to fetch installation ref: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        row.as_ref().map(ref_from_row).transpose()
    }
}
