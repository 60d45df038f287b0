//! Repository construction
//!
//! The repository traits themselves live in [`crate::repositories`]; this module holds
//! the factory abstraction the service binary uses to build a store from a client.

/// A factory for repositories
///
/// Generic over the repository type and whatever it is built from.
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance from `config`
    fn create_repository(&self, config: C) -> R;
}
