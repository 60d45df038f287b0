//! Repository for cheer notifications

use crate::error::DbError;
use crate::models::{Cheer, NewCheer};

/// Repository for cheers
pub trait CheerRepository {
    /// Store a new cheer, assigning its id and creation time
    fn create_cheer(
        &self,
        cheer: NewCheer,
    ) -> impl std::future::Future<Output = Result<Cheer, DbError>> + Send;

    /// Find a cheer by id
    fn find_cheer(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Cheer>, DbError>> + Send;

    /// Set `has_been_responded_to` on a cheer
    ///
    /// # Returns
    ///
    /// `true` if a cheer was updated, `false` if no cheer has this id
    fn mark_responded(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;

    /// Cheers addressed to `installation_id`, newest first, at most `limit`
    fn find_cheers_to(
        &self,
        installation_id: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Cheer>, DbError>> + Send;
}
