//! Repository for device registrations
//!
//! Installations are the platform records the registry hook observes. Saving is an
//! upsert that reports whether the record was new.

use crate::error::DbError;
use crate::models::{Installation, SavedInstallation};

/// Repository for device registrations
pub trait InstallationRepository {
    /// Create or update an installation
    ///
    /// An existing record keeps its `created_at`; the other fields are replaced.
    ///
    /// # Returns
    ///
    /// The stored installation and whether this call created it
    fn save_installation(
        &self,
        installation: Installation,
    ) -> impl std::future::Future<Output = Result<SavedInstallation, DbError>> + Send;

    /// Find an installation by its id
    ///
    /// # Returns
    ///
    /// The installation if found, or None if not found
    fn find_installation(
        &self,
        installation_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Installation>, DbError>> + Send;
}
