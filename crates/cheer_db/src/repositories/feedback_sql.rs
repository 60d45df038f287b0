//! SQL implementation of the feedback repository

use crate::error::DbError;
use crate::models::{now, timestamp_to_text, Feedback, NewFeedback};
use crate::repositories::feedback::FeedbackRepository;
use crate::repositories::sql_store::SqlStore;
use tracing::{debug, error, info};
use uuid::Uuid;

impl FeedbackRepository for SqlStore {
    async fn create_feedback(&self, feedback: NewFeedback) -> Result<Feedback, DbError> {
        debug!("Storing feedback from installation: {}", feedback.installation_id);

        let created = Feedback {
            id: Uuid::new_v4().to_string(),
            user_id: feedback.user_id,
            installation_id: feedback.installation_id,
            name: feedback.name,
            location_description: feedback.location_description,
            text: feedback.text,
            created_at: now(),
        };

        sqlx::query(
            r#"
            INSERT INTO feedback
                (id, environment, user_id, installation_id, name, location_description, text, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(created.id.clone())
        .bind(self.environment.as_str())
        .bind(created.user_id.clone())
        .bind(created.installation_id.clone())
        .bind(created.name.clone())
        .bind(created.location_description.clone())
        .bind(created.text.clone())
        .bind(timestamp_to_text(&created.created_at))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to insert feedback: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        info!("Feedback stored: {}", created.id);
        Ok(created)
    }
}
