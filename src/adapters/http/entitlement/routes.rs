//! Route definitions for entitlement endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{check_feature, get_subscription, list_features, EntitlementAppState};

/// Build the entitlement router.
///
/// Mounted by the binary under `/api/entitlements`.
pub fn entitlement_routes() -> Router<EntitlementAppState> {
    Router::new()
        .route("/subscription", get(get_subscription))
        .route("/features", get(list_features))
        .route("/features/:feature", get(check_feature))
}
