//! Subscription plan definitions.
//!
//! Represents the subscription tier levels available on the Flightdeck
//! platform.

use serde::{Deserialize, Serialize};

/// Subscription plan tier.
///
/// Determines baseline feature access. Capability ordering is
/// Basic < Pro < ProPlus, expressed through [`Plan::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    /// Entry tier - airline database only, plus trial-window access.
    Basic,

    /// Pro tier - unlimited logbook entries, route and resume builders.
    Pro,

    /// Pro Plus tier - everything, including map view, predictions,
    /// and resume auto-sync.
    #[serde(rename = "pro-plus")]
    ProPlus,
}

impl Plan {
    /// Resolves a free-text plan slug to a Plan.
    ///
    /// This is the single source of truth for slug resolution; snapshot
    /// normalization and the evaluator both go through it so the two
    /// cannot drift. Matching is case-insensitive and any unrecognized
    /// value resolves to `Basic` - an unknown plan never grants elevated
    /// access.
    pub fn from_slug(slug: &str) -> Self {
        match slug.to_lowercase().as_str() {
            "basic" => Plan::Basic,
            "pro" => Plan::Pro,
            "pro-plus" | "pro_plus" => Plan::ProPlus,
            _ => Plan::Basic,
        }
    }

    /// Resolves a legacy `subscription_tier` value to a Plan.
    ///
    /// Older subscription rows carry a tier field with a different
    /// vocabulary. Unrecognized values resolve to `Basic`.
    pub fn from_legacy_tier(tier: &str) -> Self {
        match tier.to_lowercase().as_str() {
            "standard" | "pro" => Plan::Pro,
            "premium" | "pro-plus" | "pro_plus" => Plan::ProPlus,
            _ => Plan::Basic,
        }
    }

    /// Returns the canonical slug for this plan.
    pub fn as_slug(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Pro => "pro",
            Plan::ProPlus => "pro-plus",
        }
    }

    /// Returns the display name for this plan.
    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Basic => "Basic",
            Plan::Pro => "Pro",
            Plan::ProPlus => "Pro Plus",
        }
    }

    /// Returns the numeric rank of this plan for comparison.
    ///
    /// Higher rank = more features.
    pub fn rank(&self) -> u8 {
        match self {
            Plan::Basic => 0,
            Plan::Pro => 1,
            Plan::ProPlus => 2,
        }
    }

    /// Returns true if this plan grants at least the capability of `other`.
    pub fn satisfies(&self, other: Plan) -> bool {
        self.rank() >= other.rank()
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
