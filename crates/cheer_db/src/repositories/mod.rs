//! Repository traits and their SQL implementation

pub mod cheer;
pub mod counter;
pub mod feedback;
pub mod installation;
pub mod installation_ref;

mod cheer_sql;
mod counter_sql;
mod feedback_sql;
mod installation_ref_sql;
mod installation_sql;
pub mod sql_store;
pub mod store_factory;

pub use cheer::CheerRepository;
pub use counter::CounterRepository;
pub use feedback::FeedbackRepository;
pub use installation::InstallationRepository;
pub use installation_ref::InstallationRefRepository;
pub use sql_store::SqlStore;
pub use store_factory::SqlStoreFactory;
