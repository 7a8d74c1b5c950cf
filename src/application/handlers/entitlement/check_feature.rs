//! CheckFeatureAccessHandler - decide one feature for one user.
//!
//! Combines the two independent lookups (subscription snapshot, admin
//! role) and runs the evaluator. The admin flag is resolved first and
//! fails closed; an admin grant never waits on subscription storage.

use std::sync::Arc;

use crate::domain::entitlement::{
    decide, AccessDecision, EntitlementError, Feature, SubscriptionSnapshot,
};
use crate::domain::foundation::UserId;
use crate::ports::{AdminDirectory, Clock, SubscriptionStore};

use super::get_subscription::fetch_or_provision;

/// Query to check one feature for a user.
#[derive(Debug, Clone)]
pub struct CheckFeatureAccessQuery {
    pub user_id: UserId,
    pub email: String,
    pub feature: Feature,
}

/// Result of a feature access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFeatureAccessResult {
    pub feature: Feature,
    pub decision: AccessDecision,
    pub is_admin: bool,
}

/// Handler for single-feature access checks.
pub struct CheckFeatureAccessHandler {
    store: Arc<dyn SubscriptionStore>,
    admin_directory: Arc<dyn AdminDirectory>,
    clock: Arc<dyn Clock>,
    trial_days: i64,
}

impl CheckFeatureAccessHandler {
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        admin_directory: Arc<dyn AdminDirectory>,
        clock: Arc<dyn Clock>,
        trial_days: i64,
    ) -> Self {
        Self {
            store,
            admin_directory,
            clock,
            trial_days,
        }
    }

    pub async fn handle(
        &self,
        query: CheckFeatureAccessQuery,
    ) -> Result<CheckFeatureAccessResult, EntitlementError> {
        let is_admin = resolve_admin(self.admin_directory.as_ref(), &query.user_id).await;
        let now = self.clock.now();

        // Admin bypass does not depend on subscription storage being
        // reachable; evaluate against the fail-safe default and return.
        if is_admin {
            return Ok(CheckFeatureAccessResult {
                feature: query.feature,
                decision: decide(&SubscriptionSnapshot::basic(), true, query.feature, now),
                is_admin,
            });
        }

        let view = fetch_or_provision(
            self.store.as_ref(),
            self.clock.as_ref(),
            self.trial_days,
            &query.user_id,
            &query.email,
        )
        .await?;

        Ok(CheckFeatureAccessResult {
            feature: query.feature,
            decision: decide(&view.snapshot, false, query.feature, now),
            is_admin,
        })
    }
}

/// Resolves the admin flag, failing closed.
///
/// Any lookup error denies elevated access; it never grants it.
pub(crate) async fn resolve_admin(directory: &dyn AdminDirectory, user_id: &UserId) -> bool {
    match directory.is_admin(user_id).await {
        Ok(is_admin) => is_admin,
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "admin lookup failed, denying admin access");
            false
        }
    }
}
