//! ListFeatureAccessHandler - decide every feature for one user.
//!
//! The gate surface's bulk query: one snapshot fetch, one admin lookup,
//! and a decision for each member of the feature taxonomy.

use std::sync::Arc;

use crate::domain::entitlement::{
    decide, AccessDecision, EntitlementError, Feature, SubscriptionSnapshot,
};
use crate::domain::foundation::UserId;
use crate::ports::{AdminDirectory, Clock, SubscriptionStore};

use super::check_feature::resolve_admin;
use super::get_subscription::fetch_or_provision;

/// Query to list access decisions for every feature.
#[derive(Debug, Clone)]
pub struct ListFeatureAccessQuery {
    pub user_id: UserId,
    pub email: String,
}

/// One feature's decision within a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureAccess {
    pub feature: Feature,
    pub decision: AccessDecision,
}

/// Result of a full feature listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFeatureAccessResult {
    pub snapshot: SubscriptionSnapshot,
    pub is_admin: bool,
    pub features: Vec<FeatureAccess>,
}

/// Handler producing a decision per feature for the gate surface.
pub struct ListFeatureAccessHandler {
    store: Arc<dyn SubscriptionStore>,
    admin_directory: Arc<dyn AdminDirectory>,
    clock: Arc<dyn Clock>,
    trial_days: i64,
}

impl ListFeatureAccessHandler {
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
        query: ListFeatureAccessQuery,
    ) -> Result<ListFeatureAccessResult, EntitlementError> {
        let is_admin = resolve_admin(self.admin_directory.as_ref(), &query.user_id).await;
        let now = self.clock.now();

        let snapshot = if is_admin {
            // Admin listings still try to show the real snapshot, but a
            // storage failure must not block the admin's access.
            fetch_or_provision(
                self.store.as_ref(),
                self.clock.as_ref(),
                self.trial_days,
                &query.user_id,
                &query.email,
            )
            .await
            .map(|view| view.snapshot)
            .unwrap_or_else(|_| SubscriptionSnapshot::basic())
        } else {
            fetch_or_provision(
                self.store.as_ref(),
                self.clock.as_ref(),
                self.trial_days,
                &query.user_id,
                &query.email,
            )
            .await?
            .snapshot
        };

        let features = Feature::ALL
            .iter()
            .map(|&feature| FeatureAccess {
                feature,
                decision: decide(&snapshot, is_admin, feature, now),
            })
            .collect();

        Ok(ListFeatureAccessResult {
            snapshot,
            is_admin,
            features,
        })
    }
}
