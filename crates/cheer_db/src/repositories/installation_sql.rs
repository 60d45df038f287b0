//! SQL implementation of the installation repository

use crate::error::DbError;
use crate::models::{
    now, timestamp_from_text, timestamp_to_text, Installation, SavedInstallation,
};
use crate::repositories::installation::InstallationRepository;
use crate::repositories::sql_store::{optional_text, SqlStore};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

fn installation_from_row(row: &AnyRow) -> Result<Installation, DbError> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Installation {
        installation_id: row.try_get("installation_id")?,
        app_name: optional_text(row, "app_name")?,
        app_identifier: optional_text(row, "app_identifier")?,
        device_token: optional_text(row, "device_token")?,
        created_at: Some(timestamp_from_text(&created_at)?),
        updated_at: Some(timestamp_from_text(&updated_at)?),
    })
}

impl InstallationRepository for SqlStore {
    async fn save_installation(
        &self,
        installation: Installation,
    ) -> Result<SavedInstallation, DbError> {
        debug!("Saving installation: {}", installation.installation_id);

        let saved_at = now();
        let existing = self.find_installation(&installation.installation_id).await?;

        if let Some(existing) = existing {
            debug!(
                "Updating existing installation: {}",
                installation.installation_id
            );

            sqlx::query(
                r#"
                UPDATE installations
                SET app_name = $1, app_identifier = $2, device_token = $3, updated_at = $4
                WHERE environment = $5 AND installation_id = $6
                "#,
            )
            .bind(installation.app_name.clone())
            .bind(installation.app_identifier.clone())
            .bind(installation.device_token.clone())
            .bind(timestamp_to_text(&saved_at))
            .bind(self.environment.as_str())
            .bind(installation.installation_id.clone())
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to update installation: {}", e);
                DbError::QueryError(e.to_string())
            })?;

            let updated = Installation {
                created_at: existing.created_at,
                updated_at: Some(saved_at),
                ..installation
            };

            info!("Installation updated successfully");
            return Ok(SavedInstallation {
                installation: updated,
                is_new_record: false,
            });
        }

        debug!("Creating new installation: {}", installation.installation_id);

        sqlx::query(
            r#"
            INSERT INTO installations
                (environment, installation_id, app_name, app_identifier, device_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(self.environment.as_str())
        .bind(installation.installation_id.clone())
        .bind(installation.app_name.clone())
        .bind(installation.app_identifier.clone())
        .bind(installation.device_token.clone())
        .bind(timestamp_to_text(&saved_at))
        .bind(timestamp_to_text(&saved_at))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to insert installation: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        let inserted = Installation {
            created_at: Some(saved_at),
            updated_at: Some(saved_at),
            ..installation
        };

        info!("Installation created successfully");
        Ok(SavedInstallation {
            installation: inserted,
            is_new_record: true,
        })
    }

    async fn find_installation(
        &self,
        installation_id: &str,
    ) -> Result<Option<Installation>, DbError> {
        debug!("Finding installation: {}", installation_id);

        let row = sqlx::query(
            r#"
            SELECT installation_id,
                COALESCE(app_name, '') AS app_name,
                COALESCE(app_identifier, '') AS app_identifier,
                COALESCE(device_token, '') AS device_token,
                created_at, updated_at
            FROM installations
            WHERE environment = $1 AND installation_id = $2
            "#,
        )
        .bind(self.environment.as_str())
        .bind(installation_id.to_string())
        .fetch_optional(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to find installation: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        row.as_ref().map(installation_from_row).transpose()
    }
}
