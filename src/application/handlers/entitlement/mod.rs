//! Entitlement application handlers.
//!
//! Query handlers composing the ports (subscription store, admin
//! directory, clock) with the pure evaluator.

mod check_feature;
mod get_subscription;
mod list_features;

pub use check_feature::{
    CheckFeatureAccessHandler, CheckFeatureAccessQuery, CheckFeatureAccessResult,
};
pub use get_subscription::{GetSubscriptionHandler, GetSubscriptionQuery, SubscriptionView};
pub use list_features::{
    FeatureAccess, ListFeatureAccessHandler, ListFeatureAccessQuery, ListFeatureAccessResult,
};
