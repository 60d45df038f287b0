//! Repository for the installation side index used for random sampling

use crate::error::DbError;
use crate::models::InstallationRef;

/// Repository for installation refs
///
/// Refs are only ever created; nothing here updates or deletes them.
pub trait InstallationRefRepository {
    /// Find the ref pointing at `installation_id`, if any
    fn find_ref_by_installation(
        &self,
        installation_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<InstallationRef>, DbError>> + Send;

    /// Create a ref for `installation_id`
    fn create_ref(
        &self,
        installation_id: &str,
        app_name: Option<&str>,
    ) -> impl std::future::Future<Output = Result<InstallationRef, DbError>> + Send;

    /// Return the ref at ordinal `skip` among all refs except those for
    /// `excluding_installation_id`, ordered by creation time ascending
    ///
    /// # Returns
    ///
    /// `None` when fewer than `skip + 1` refs qualify
    fn nth_ref_excluding(
        &self,
        excluding_installation_id: &str,
        skip: u64,
    ) -> impl std::future::Future<Output = Result<Option<InstallationRef>, DbError>> + Send;
}
