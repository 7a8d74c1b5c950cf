//! Gateable feature definitions.
//!
//! Each feature is a named capability checked independently of where it
//! appears in a consuming surface. The set is closed: adding a feature
//! means adding an enum member, and the exhaustive matches in
//! [`Feature::minimum_plan`], [`Feature::trial_unlocks`], and
//! [`Feature::upgrade_message`] force the new member to get a rule, a
//! trial policy, and an upgrade message in the same change.

use serde::{Deserialize, Serialize};

use super::Plan;

/// A gateable capability, namespaced by subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    /// Log more than the free entry allowance.
    LogbookUnlimitedEntries,

    /// Map rendering of logged flights.
    LogbookMapView,

    /// Hour-accumulation predictions from logged flights.
    LogbookPredictions,

    /// The route / training-plan builder.
    RouteBuilderAccess,

    /// The resume builder.
    ResumeBuilderAccess,

    /// Automatic resume sync from logbook data.
    ResumeAutoSync,

    /// The airline database. Available to every plan.
    AirlineDatabaseAccess,
}

impl Feature {
    /// Every feature, for exhaustiveness checks and full decision listings.
    pub const ALL: [Feature; 7] = [
        Feature::LogbookUnlimitedEntries,
        Feature::LogbookMapView,
        Feature::LogbookPredictions,
        Feature::RouteBuilderAccess,
        Feature::ResumeBuilderAccess,
        Feature::ResumeAutoSync,
        Feature::AirlineDatabaseAccess,
    ];

    /// The lowest plan whose holders are granted this feature.
    pub fn minimum_plan(&self) -> Plan {
        match self {
            Feature::LogbookUnlimitedEntries => Plan::Pro,
            Feature::LogbookMapView => Plan::ProPlus,
            Feature::LogbookPredictions => Plan::ProPlus,
            Feature::RouteBuilderAccess => Plan::Pro,
            Feature::ResumeBuilderAccess => Plan::Pro,
            Feature::ResumeAutoSync => Plan::ProPlus,
            Feature::AirlineDatabaseAccess => Plan::Basic,
        }
    }

    /// Whether an active trial grants this feature to a Basic-plan user.
    ///
    /// The trial unlocks the builders only; it never unlocks the
    /// Pro Plus logbook extras.
    pub fn trial_unlocks(&self) -> bool {
        match self {
            Feature::RouteBuilderAccess | Feature::ResumeBuilderAccess => true,
            Feature::LogbookUnlimitedEntries
            | Feature::LogbookMapView
            | Feature::LogbookPredictions
            | Feature::ResumeAutoSync
            | Feature::AirlineDatabaseAccess => false,
        }
    }

    /// Human-readable upgrade prompt shown when this feature is denied.
    pub fn upgrade_message(&self) -> &'static str {
        match self {
            Feature::LogbookUnlimitedEntries => {
                "Upgrade to Pro for unlimited logbook entries."
            }
            Feature::LogbookMapView => {
                "Upgrade to Pro Plus to see your flights on the map."
            }
            Feature::LogbookPredictions => {
                "Upgrade to Pro Plus for hour-accumulation predictions."
            }
            Feature::RouteBuilderAccess => {
                "Upgrade to Pro to keep building routes and training plans."
            }
            Feature::ResumeBuilderAccess => {
                "Upgrade to Pro to keep using the resume builder."
            }
            Feature::ResumeAutoSync => {
                "Upgrade to Pro Plus to sync your resume from your logbook."
            }
            Feature::AirlineDatabaseAccess => {
                "The airline database is included with every plan."
            }
        }
    }

    /// Parses a wire key into a Feature.
    ///
    /// Returns `None` for unrecognized keys; callers deny access rather
    /// than guessing.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "logbook-unlimited-entries" => Some(Feature::LogbookUnlimitedEntries),
            "logbook-map-view" => Some(Feature::LogbookMapView),
            "logbook-predictions" => Some(Feature::LogbookPredictions),
            "route-builder-access" => Some(Feature::RouteBuilderAccess),
            "resume-builder-access" => Some(Feature::ResumeBuilderAccess),
            "resume-auto-sync" => Some(Feature::ResumeAutoSync),
            "airline-database-access" => Some(Feature::AirlineDatabaseAccess),
            _ => None,
        }
    }

    /// Returns the canonical wire key for this feature.
    pub fn as_key(&self) -> &'static str {
        match self {
            Feature::LogbookUnlimitedEntries => "logbook-unlimited-entries",
            Feature::LogbookMapView => "logbook-map-view",
            Feature::LogbookPredictions => "logbook-predictions",
            Feature::RouteBuilderAccess => "route-builder-access",
            Feature::ResumeBuilderAccess => "resume-builder-access",
            Feature::ResumeAutoSync => "resume-auto-sync",
            Feature::AirlineDatabaseAccess => "airline-database-access",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_key())
    }
}
