//! Entitlement-specific error types.
//!
//! Errors surfaced by subscription fetch/provisioning and access checks.
//! The evaluator itself is total and never produces one of these.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Unauthenticated | 401 |
//! | UnknownFeature | 404 |
//! | ProvisioningFailed | 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::UserId;

/// Entitlement-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntitlementError {
    /// No authenticated user identity was supplied.
    Unauthenticated,

    /// The requested feature key is not in the taxonomy.
    ///
    /// Always a denial; an unknown key must never be treated as an allow.
    UnknownFeature(String),

    /// First-time trial provisioning failed.
    ///
    /// Fatal to the fetch attempt - a snapshot is never fabricated
    /// client-side from a failed write.
    ProvisioningFailed { user_id: UserId, reason: String },

    /// Storage or other infrastructure error.
    Infrastructure(String),
}

impl EntitlementError {
    pub fn unknown_feature(key: impl Into<String>) -> Self {
        EntitlementError::UnknownFeature(key.into())
    }

    pub fn provisioning_failed(user_id: UserId, reason: impl Into<String>) -> Self {
        EntitlementError::ProvisioningFailed {
            user_id,
            reason: reason.into(),
        }
    }

    pub fn infrastructure(reason: impl Into<String>) -> Self {
        EntitlementError::Infrastructure(reason.into())
    }

    /// User-facing message for this error.
    pub fn message(&self) -> String {
        match self {
            EntitlementError::Unauthenticated => "Authentication is required.".to_string(),
            EntitlementError::UnknownFeature(key) => {
                format!("Unknown feature '{}'.", key)
            }
            EntitlementError::ProvisioningFailed { .. } => {
                "Could not set up your subscription. Please try again.".to_string()
            }
            EntitlementError::Infrastructure(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

impl std::fmt::Display for EntitlementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntitlementError::Unauthenticated => write!(f, "Authentication required"),
            EntitlementError::UnknownFeature(key) => write!(f, "Unknown feature '{}'", key),
            EntitlementError::ProvisioningFailed { user_id, reason } => {
                write!(f, "Provisioning failed for user {}: {}", user_id, reason)
            }
            EntitlementError::Infrastructure(reason) => {
                write!(f, "Infrastructure error: {}", reason)
            }
        }
    }
}

impl std::error::Error for EntitlementError {}
