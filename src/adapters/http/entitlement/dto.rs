//! HTTP DTOs (Data Transfer Objects) for entitlement endpoints.
//!
//! These types define the JSON response structure for the entitlement
//! API. They serve as the boundary between HTTP and the application
//! layer.

use serde::Serialize;

use crate::application::handlers::entitlement::{
    FeatureAccess, ListFeatureAccessResult, SubscriptionView,
};
use crate::domain::entitlement::Plan;

/// Response for a user's subscription snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    /// Resolved plan slug.
    pub plan: Plan,
    /// Whether a paid subscription is currently active.
    pub subscribed: bool,
    /// Start of the trial window (ISO 8601), if one exists.
    pub trial_starts_at: Option<String>,
    /// End of the trial window (ISO 8601), if one exists.
    pub trial_ends_at: Option<String>,
    /// True when this request provisioned the record.
    pub provisioned: bool,
}

impl From<SubscriptionView> for SubscriptionResponse {
    fn from(view: SubscriptionView) -> Self {
        Self {
            plan: view.snapshot.plan,
            subscribed: view.snapshot.subscribed,
            trial_starts_at: view
                .snapshot
                .trial
                .map(|t| t.starts_at.as_datetime().to_rfc3339()),
            trial_ends_at: view
                .snapshot
                .trial
                .map(|t| t.ends_at.as_datetime().to_rfc3339()),
            provisioned: view.provisioned,
        }
    }
}

/// One feature's access decision.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureAccessResponse {
    /// Feature key.
    pub feature: &'static str,
    /// Whether access is granted right now.
    pub granted: bool,
    /// Upgrade prompt to display; present only on denial.
    pub upgrade_message: Option<&'static str>,
}

impl From<FeatureAccess> for FeatureAccessResponse {
    fn from(access: FeatureAccess) -> Self {
        Self {
            feature: access.feature.as_key(),
            granted: access.decision.granted,
            upgrade_message: access.decision.upgrade_message,
        }
    }
}

/// Response listing every feature's decision for the caller.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureListResponse {
    pub plan: Plan,
    pub is_admin: bool,
    pub features: Vec<FeatureAccessResponse>,
}

impl From<ListFeatureAccessResult> for FeatureListResponse {
    fn from(result: ListFeatureAccessResult) -> Self {
        Self {
            plan: result.snapshot.plan,
            is_admin: result.is_admin,
            features: result
                .features
                .into_iter()
                .map(FeatureAccessResponse::from)
                .collect(),
        }
    }
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
