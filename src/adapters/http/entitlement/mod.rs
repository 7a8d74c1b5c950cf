//! HTTP adapter for entitlement endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AuthenticatedUser, EntitlementApiError, EntitlementAppState};
pub use routes::entitlement_routes;
