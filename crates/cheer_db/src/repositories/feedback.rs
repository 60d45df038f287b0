//! Repository for app feedback

use crate::error::DbError;
use crate::models::{Feedback, NewFeedback};

/// Repository for feedback
pub trait FeedbackRepository {
    /// Store a feedback message
    fn create_feedback(
        &self,
        feedback: NewFeedback,
    ) -> impl std::future::Future<Output = Result<Feedback, DbError>> + Send;
}
