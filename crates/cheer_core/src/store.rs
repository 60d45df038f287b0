//! The store capabilities the cheer pipeline needs, as one bound

use cheer_db::{
    CheerRepository, CounterRepository, FeedbackRepository, InstallationRefRepository,
    InstallationRepository,
};

/// Every repository of the cheer store
///
/// Implemented for anything that implements all of them, `cheer_db::SqlStore` included.
pub trait CheerStore:
    InstallationRepository
    + InstallationRefRepository
    + CounterRepository
    + CheerRepository
    + FeedbackRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> CheerStore for T where
    T: InstallationRepository
        + InstallationRefRepository
        + CounterRepository
        + CheerRepository
        + FeedbackRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
