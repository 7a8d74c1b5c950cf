//! Entitlement evaluator - the pure access-decision core.
//!
//! Given a snapshot, an admin flag, a feature, and an explicit `now`,
//! [`decide`] answers whether access is granted right now. No I/O, no
//! clock reads, no mutable state: safe to call from anywhere, any number
//! of times, and trivially testable at arbitrary instants.
//!
//! # Rule table
//!
//! | Feature | Granted when |
//! |---|---|
//! | logbook-unlimited-entries | plan >= Pro |
//! | logbook-map-view | plan = Pro Plus |
//! | logbook-predictions | plan = Pro Plus |
//! | route-builder-access | plan >= Pro, or Basic with active trial |
//! | resume-builder-access | plan >= Pro, or Basic with active trial |
//! | resume-auto-sync | plan = Pro Plus |
//! | airline-database-access | always |
//!
//! An admin flag grants everything and is checked before any other rule.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

use super::{Feature, Plan, SubscriptionSnapshot};

/// The outcome of one access check.
///
/// Ephemeral: recomputed on every check, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    /// Whether access is granted right now.
    pub granted: bool,

    /// Upgrade prompt for the caller to surface; present only on denial.
    pub upgrade_message: Option<&'static str>,
}

impl AccessDecision {
    fn granted() -> Self {
        Self {
            granted: true,
            upgrade_message: None,
        }
    }

    fn denied(feature: Feature) -> Self {
        Self {
            granted: false,
            upgrade_message: Some(feature.upgrade_message()),
        }
    }
}

/// Returns the plan in effect for a snapshot.
///
/// Snapshots already carry a resolved [`Plan`] (normalization runs
/// `Plan::from_slug` at fetch time), so this is a projection; it exists
/// so callers have one named place to ask and cannot re-derive the plan
/// from raw fields.
pub fn effective_plan(snapshot: &SubscriptionSnapshot) -> Plan {
    snapshot.plan
}

/// True iff the snapshot's trial window is active at `now`.
///
/// Strict comparison: at the boundary instant the trial is over. No
/// grace period, no clock-skew tolerance.
pub fn in_trial(snapshot: &SubscriptionSnapshot, now: Timestamp) -> bool {
    snapshot
        .trial
        .map(|window| window.is_active(now))
        .unwrap_or(false)
}

/// Decides whether `feature` is granted for the given snapshot at `now`.
///
/// The admin flag short-circuits everything else, so an admin is granted
/// access even when the snapshot is the fail-safe default.
pub fn decide(
    snapshot: &SubscriptionSnapshot,
    is_admin: bool,
    feature: Feature,
    now: Timestamp,
) -> AccessDecision {
    if is_admin {
        return AccessDecision::granted();
    }

    let plan = effective_plan(snapshot);
    if plan.satisfies(feature.minimum_plan()) {
        return AccessDecision::granted();
    }

    if feature.trial_unlocks() && in_trial(snapshot, now) {
        return AccessDecision::granted();
    }

    AccessDecision::denied(feature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entitlement::{RawSubscriptionRecord, TrialWindow};
    use proptest::prelude::*;

    fn snapshot(plan: Plan, trial: Option<TrialWindow>) -> SubscriptionSnapshot {
        SubscriptionSnapshot {
            plan,
            trial,
            subscribed: plan != Plan::Basic,
        }
    }

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn active_trial() -> Option<TrialWindow> {
        Some(TrialWindow::starting_at(now().minus_days(1), 7))
    }

    fn lapsed_trial() -> Option<TrialWindow> {
        Some(TrialWindow::starting_at(now().minus_days(30), 7))
    }

    // Admin override

    #[test]
    fn admin_is_granted_every_feature() {
        for feature in Feature::ALL {
            let decision = decide(&SubscriptionSnapshot::basic(), true, feature, now());
            assert!(decision.granted, "admin denied {}", feature);
            assert!(decision.upgrade_message.is_none());
        }
    }

    // Rule table

    #[test]
    fn pro_plus_is_granted_every_feature_without_trial() {
        for feature in Feature::ALL {
            let decision = decide(&snapshot(Plan::ProPlus, None), false, feature, now());
            assert!(decision.granted, "pro-plus denied {}", feature);
        }
    }

    #[test]
    fn basic_without_trial_gets_airline_database_only() {
        for feature in Feature::ALL {
            let decision = decide(&SubscriptionSnapshot::basic(), false, feature, now());
            assert_eq!(
                decision.granted,
                feature == Feature::AirlineDatabaseAccess,
                "unexpected decision for {}",
                feature
            );
        }
    }

    #[test]
    fn pro_gets_builders_and_unlimited_entries_but_not_pro_plus_extras() {
        let snap = snapshot(Plan::Pro, None);

        assert!(decide(&snap, false, Feature::LogbookUnlimitedEntries, now()).granted);
        assert!(decide(&snap, false, Feature::RouteBuilderAccess, now()).granted);
        assert!(decide(&snap, false, Feature::ResumeBuilderAccess, now()).granted);
        assert!(decide(&snap, false, Feature::AirlineDatabaseAccess, now()).granted);

        assert!(!decide(&snap, false, Feature::LogbookMapView, now()).granted);
        assert!(!decide(&snap, false, Feature::LogbookPredictions, now()).granted);
        assert!(!decide(&snap, false, Feature::ResumeAutoSync, now()).granted);
    }

    #[test]
    fn basic_with_active_trial_gets_the_builders() {
        let snap = snapshot(Plan::Basic, active_trial());

        assert!(decide(&snap, false, Feature::RouteBuilderAccess, now()).granted);
        assert!(decide(&snap, false, Feature::ResumeBuilderAccess, now()).granted);
    }

    #[test]
    fn trial_never_unlocks_pro_plus_extras() {
        let snap = snapshot(Plan::Basic, active_trial());

        assert!(!decide(&snap, false, Feature::LogbookMapView, now()).granted);
        assert!(!decide(&snap, false, Feature::LogbookPredictions, now()).granted);
        assert!(!decide(&snap, false, Feature::ResumeAutoSync, now()).granted);
        assert!(!decide(&snap, false, Feature::LogbookUnlimitedEntries, now()).granted);
    }

    #[test]
    fn lapsed_trial_denies_the_builders() {
        let snap = snapshot(Plan::Basic, lapsed_trial());

        assert!(!decide(&snap, false, Feature::RouteBuilderAccess, now()).granted);
        assert!(!decide(&snap, false, Feature::ResumeBuilderAccess, now()).granted);
    }

    #[test]
    fn denied_decision_carries_the_upgrade_message() {
        let decision = decide(
            &SubscriptionSnapshot::basic(),
            false,
            Feature::LogbookMapView,
            now(),
        );
        assert!(!decision.granted);
        assert_eq!(
            decision.upgrade_message,
            Some(Feature::LogbookMapView.upgrade_message())
        );
    }

    // Trial boundary

    #[test]
    fn in_trial_is_strict_at_the_boundary() {
        let ends = now();
        let snap = snapshot(
            Plan::Basic,
            Some(TrialWindow {
                starts_at: ends.minus_days(7),
                ends_at: ends,
            }),
        );

        assert!(in_trial(&snap, ends.minus_secs(1)));
        assert!(!in_trial(&snap, ends));
        assert!(!in_trial(&snap, ends.plus_secs(1)));
    }

    #[test]
    fn in_trial_is_false_without_a_window() {
        assert!(!in_trial(&SubscriptionSnapshot::basic(), now()));
    }

    #[test]
    fn builder_access_flips_at_trial_expiry() {
        let ends = now();
        let snap = snapshot(
            Plan::Basic,
            Some(TrialWindow {
                starts_at: ends.minus_days(7),
                ends_at: ends,
            }),
        );

        let before = decide(&snap, false, Feature::RouteBuilderAccess, ends.minus_secs(1));
        let at = decide(&snap, false, Feature::RouteBuilderAccess, ends);
        assert!(before.granted);
        assert!(!at.granted);
    }

    #[test]
    fn effective_plan_agrees_with_normalization() {
        let record = RawSubscriptionRecord {
            plan_slug: Some("PRO_PLUS".to_string()),
            ..Default::default()
        };
        let snap = SubscriptionSnapshot::normalize(&record);
        assert_eq!(effective_plan(&snap), Plan::from_slug("pro_plus"));
    }

    // Property tests

    fn arb_plan() -> impl Strategy<Value = Plan> {
        prop_oneof![Just(Plan::Basic), Just(Plan::Pro), Just(Plan::ProPlus)]
    }

    fn arb_feature() -> impl Strategy<Value = Feature> {
        prop::sample::select(Feature::ALL.to_vec())
    }

    fn arb_snapshot() -> impl Strategy<Value = SubscriptionSnapshot> {
        (arb_plan(), any::<bool>(), 0u64..4_000_000_000, 0i64..30).prop_map(
            |(plan, subscribed, start_secs, days)| SubscriptionSnapshot {
                plan,
                trial: (days > 0).then(|| {
                    TrialWindow::starting_at(Timestamp::from_unix_secs(start_secs), days)
                }),
                subscribed,
            },
        )
    }

    proptest! {
        #[test]
        fn admin_override_holds_for_all_snapshots(
            snap in arb_snapshot(),
            feature in arb_feature(),
            now_secs in 0u64..4_000_000_000,
        ) {
            let decision = decide(&snap, true, feature, Timestamp::from_unix_secs(now_secs));
            prop_assert!(decision.granted);
        }

        #[test]
        fn airline_database_is_always_granted(
            snap in arb_snapshot(),
            now_secs in 0u64..4_000_000_000,
        ) {
            let decision = decide(
                &snap,
                false,
                Feature::AirlineDatabaseAccess,
                Timestamp::from_unix_secs(now_secs),
            );
            prop_assert!(decision.granted);
        }

        #[test]
        fn denial_always_carries_a_message(
            snap in arb_snapshot(),
            feature in arb_feature(),
            now_secs in 0u64..4_000_000_000,
        ) {
            let decision = decide(&snap, false, feature, Timestamp::from_unix_secs(now_secs));
            prop_assert_eq!(decision.upgrade_message.is_none(), decision.granted);
        }

        #[test]
        fn plan_upgrades_never_revoke_access(
            feature in arb_feature(),
            now_secs in 0u64..4_000_000_000,
        ) {
            // Monotonicity across the plan ordering: anything Basic gets,
            // Pro gets; anything Pro gets, Pro Plus gets.
            let now = Timestamp::from_unix_secs(now_secs);
            let mut prev_granted = false;
            for plan in [Plan::Basic, Plan::Pro, Plan::ProPlus] {
                let snap = SubscriptionSnapshot { plan, trial: None, subscribed: false };
                let granted = decide(&snap, false, feature, now).granted;
                prop_assert!(granted || !prev_granted);
                prev_granted = granted;
            }
        }
    }
}
