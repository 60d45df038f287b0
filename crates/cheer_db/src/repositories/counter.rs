//! Repository for the per-environment installation counter

use crate::error::DbError;

/// Repository for the installation counter
pub trait CounterRepository {
    /// Read the current count
    ///
    /// # Returns
    ///
    /// `None` when the counter record does not exist
    fn get_count(&self) -> impl std::future::Future<Output = Result<Option<i64>, DbError>> + Send;

    /// Atomically add one to the counter
    ///
    /// # Returns
    ///
    /// The new count, or `None` when the counter record does not exist
    fn increment_count(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<i64>, DbError>> + Send;
}
