//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SubscriptionStore` - Read/provision subscription records
//! - `AdminDirectory` - Admin role lookup (fail-closed at the caller)
//! - `Clock` - Injected time source for trial evaluation

mod admin_directory;
mod clock;
mod subscription_store;

pub use admin_directory::AdminDirectory;
pub use clock::{Clock, FixedClock, SystemClock};
pub use subscription_store::{NewSubscription, SubscriptionStore};
