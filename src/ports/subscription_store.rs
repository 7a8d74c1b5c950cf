//! Subscription store port.
//!
//! Defines the contract with the external storage collaborator holding
//! subscription records. The store is the source of truth; the
//! application layer only reads records and performs the one write in
//! this subsystem: first-time trial provisioning.
//!
//! # Design
//!
//! - **Narrow**: one read, one insert; everything else is policy
//! - **Idempotent provisioning**: concurrent first-fetches for the same
//!   user must converge on a single row - implementations back the
//!   insert with a uniqueness constraint on the user id and return the
//!   existing row when the insert loses the race
//!
//! # Example
//!
//! ```ignore
//! let record = match store.find_by_user(&user_id).await? {
//!     Some(record) => record,
//!     None => store.insert(NewSubscription::basic_trial(user_id, email, now, 7)).await?,
//! };
//! let snapshot = SubscriptionSnapshot::normalize(&record);
//! ```

use async_trait::async_trait;

use crate::domain::entitlement::{Plan, RawSubscriptionRecord, TrialWindow};
use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// A subscription record to be inserted for a first-time user.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub user_id: UserId,
    pub email: String,
    pub plan: Plan,
    pub subscribed: bool,
    pub trial: TrialWindow,
}

impl NewSubscription {
    /// The standard first-time record: Basic plan, unsubscribed, with a
    /// trial window of `trial_days` starting at `now`.
    pub fn basic_trial(
        user_id: UserId,
        email: impl Into<String>,
        now: Timestamp,
        trial_days: i64,
    ) -> Self {
        Self {
            user_id,
            email: email.into(),
            plan: Plan::Basic,
            subscribed: false,
            trial: TrialWindow::starting_at(now, trial_days),
        }
    }
}

/// Port for reading and provisioning subscription records.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Find the subscription record for a user.
    ///
    /// Returns `None` if the user has never been provisioned.
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<RawSubscriptionRecord>, DomainError>;

    /// Insert a first-time subscription record.
    ///
    /// Must be idempotent per user: when a concurrent insert for the
    /// same user already won, implementations return that existing row
    /// rather than failing or duplicating.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure. Callers must surface
    ///   this rather than fabricating a record.
    async fn insert(
        &self,
        subscription: NewSubscription,
    ) -> Result<RawSubscriptionRecord, DomainError>;
}
