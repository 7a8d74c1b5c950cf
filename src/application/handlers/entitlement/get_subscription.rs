//! GetSubscriptionHandler - fetch-or-provision a user's snapshot.
//!
//! The lifecycle read path: load the user's subscription record, lazily
//! provisioning a first-time trial record when none exists, and
//! normalize into a canonical snapshot.

use std::sync::Arc;

use crate::domain::entitlement::{EntitlementError, SubscriptionSnapshot};
use crate::domain::foundation::UserId;
use crate::ports::{Clock, NewSubscription, SubscriptionStore};

/// Query for a user's current subscription snapshot.
#[derive(Debug, Clone)]
pub struct GetSubscriptionQuery {
    pub user_id: UserId,
    /// Email for the provisioning insert, should this be a first fetch.
    pub email: String,
}

/// A normalized snapshot plus whether this fetch provisioned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionView {
    pub snapshot: SubscriptionSnapshot,
    pub provisioned: bool,
}

/// Handler producing a current snapshot for a user, creating the record
/// if absent.
pub struct GetSubscriptionHandler {
    store: Arc<dyn SubscriptionStore>,
    clock: Arc<dyn Clock>,
    trial_days: i64,
}

impl GetSubscriptionHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>, clock: Arc<dyn Clock>, trial_days: i64) -> Self {
        Self {
            store,
            clock,
            trial_days,
        }
    }

    pub async fn handle(
        &self,
        query: GetSubscriptionQuery,
    ) -> Result<SubscriptionView, EntitlementError> {
        fetch_or_provision(
            self.store.as_ref(),
            self.clock.as_ref(),
            self.trial_days,
            &query.user_id,
            &query.email,
        )
        .await
    }
}

/// Shared lifecycle read: fetch the record, provisioning on first use.
///
/// Provisioning is write-then-use: the snapshot is built from the row the
/// insert returned, and an insert failure propagates instead of being
/// papered over with a client-side default.
pub(crate) async fn fetch_or_provision(
    store: &dyn SubscriptionStore,
    clock: &dyn Clock,
    trial_days: i64,
    user_id: &UserId,
    email: &str,
) -> Result<SubscriptionView, EntitlementError> {
    let existing = store
        .find_by_user(user_id)
        .await
        .map_err(|e| EntitlementError::infrastructure(e.to_string()))?;

    if let Some(record) = existing {
        return Ok(SubscriptionView {
            snapshot: SubscriptionSnapshot::normalize(&record),
            provisioned: false,
        });
    }

    tracing::info!(user_id = %user_id, "provisioning first-time trial subscription");

    let record = store
        .insert(NewSubscription::basic_trial(
            user_id.clone(),
            email,
            clock.now(),
            trial_days,
        ))
        .await
        .map_err(|e| EntitlementError::provisioning_failed(user_id.clone(), e.to_string()))?;

    Ok(SubscriptionView {
        snapshot: SubscriptionSnapshot::normalize(&record),
        provisioned: true,
    })
}
