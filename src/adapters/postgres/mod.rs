//! PostgreSQL adapters implementing the storage ports.

mod admin_directory;
mod subscription_store;

pub use admin_directory::PostgresAdminDirectory;
pub use subscription_store::PostgresSubscriptionStore;
