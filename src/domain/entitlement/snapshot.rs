//! Subscription snapshot and storage-record normalization.
//!
//! Storage hands back rows in whatever shape they were written over the
//! product's lifetime: the current `plan_slug` field, the legacy
//! `subscription_tier` field, or a partially-populated mix. Normalization
//! collapses all of those into one canonical, immutable
//! [`SubscriptionSnapshot`]. It is total - malformed input resolves to a
//! Basic-tier snapshot with no trial, never an error.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::Plan;

/// A subscription row as storage returns it, before normalization.
///
/// Field optionality is deliberate: legacy rows have `subscription_tier`
/// and no `plan_slug`, rows written before trials existed have neither
/// trial timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSubscriptionRecord {
    /// Current free-text plan slug, if the row has one.
    pub plan_slug: Option<String>,

    /// Legacy tier field, consulted only when `plan_slug` is absent.
    pub subscription_tier: Option<String>,

    /// Start of the trial window.
    pub trial_starts_at: Option<Timestamp>,

    /// End of the trial window.
    pub trial_ends_at: Option<Timestamp>,

    /// True only while a paid subscription is active.
    #[serde(default)]
    pub subscribed: bool,
}

/// A trial window with both endpoints present.
///
/// The both-or-neither invariant from storage is encoded structurally:
/// a snapshot either has a complete window or none at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialWindow {
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

impl TrialWindow {
    /// Creates a trial window of `days` days starting at `starts_at`.
    pub fn starting_at(starts_at: Timestamp, days: i64) -> Self {
        Self {
            starts_at,
            ends_at: starts_at.add_days(days),
        }
    }

    /// True iff `now` is strictly before the window's end.
    ///
    /// The boundary instant itself is outside the window.
    pub fn is_active(&self, now: Timestamp) -> bool {
        now < self.ends_at
    }
}

/// Immutable, point-in-time view of one user's entitlement state.
///
/// Produced by [`SubscriptionSnapshot::normalize`]; replaced wholesale on
/// refetch, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    /// Resolved plan tier.
    pub plan: Plan,

    /// Trial window, if the row carried a complete one.
    pub trial: Option<TrialWindow>,

    /// True only while a paid subscription is active.
    pub subscribed: bool,
}

impl SubscriptionSnapshot {
    /// The fail-safe default: Basic plan, no trial, unsubscribed.
    ///
    /// Used for unauthenticated callers and wherever no record exists
    /// at decision time.
    pub fn basic() -> Self {
        Self {
            plan: Plan::Basic,
            trial: None,
            subscribed: false,
        }
    }

    /// Normalizes a storage record into a canonical snapshot.
    ///
    /// Resolution prefers `plan_slug` and falls back to the legacy
    /// `subscription_tier` mapping only when the current field is absent.
    /// A lone trial timestamp is dropped rather than guessed at.
    pub fn normalize(raw: &RawSubscriptionRecord) -> Self {
        let plan = match (&raw.plan_slug, &raw.subscription_tier) {
            (Some(slug), _) => Plan::from_slug(slug),
            (None, Some(tier)) => Plan::from_legacy_tier(tier),
            (None, None) => Plan::Basic,
        };

        let trial = match (raw.trial_starts_at, raw.trial_ends_at) {
            (Some(starts_at), Some(ends_at)) => Some(TrialWindow { starts_at, ends_at }),
            _ => None,
        };

        Self {
            plan,
            trial,
            subscribed: raw.subscribed,
        }
    }
}
