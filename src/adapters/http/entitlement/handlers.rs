//! HTTP handlers for entitlement endpoints.
//!
//! These handlers connect Axum routes to application layer query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::entitlement::{
    CheckFeatureAccessQuery, GetSubscriptionQuery, ListFeatureAccessQuery,
};
use crate::domain::entitlement::{EntitlementError, Feature};
use crate::domain::foundation::UserId;
use crate::ports::{AdminDirectory, Clock, SubscriptionStore};

use super::dto::{
    ErrorResponse, FeatureAccessResponse, FeatureListResponse, SubscriptionResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct EntitlementAppState {
    pub subscription_store: Arc<dyn SubscriptionStore>,
    pub admin_directory: Arc<dyn AdminDirectory>,
    pub clock: Arc<dyn Clock>,
    pub trial_days: i64,
}

impl EntitlementAppState {
    /// Create handlers on demand from the shared state.
    pub fn get_subscription_handler(
        &self,
    ) -> crate::application::handlers::entitlement::GetSubscriptionHandler {
        crate::application::handlers::entitlement::GetSubscriptionHandler::new(
            self.subscription_store.clone(),
            self.clock.clone(),
            self.trial_days,
        )
    }

    pub fn check_feature_handler(
        &self,
    ) -> crate::application::handlers::entitlement::CheckFeatureAccessHandler {
        crate::application::handlers::entitlement::CheckFeatureAccessHandler::new(
            self.subscription_store.clone(),
            self.admin_directory.clone(),
            self.clock.clone(),
            self.trial_days,
        )
    }

    pub fn list_features_handler(
        &self,
    ) -> crate::application::handlers::entitlement::ListFeatureAccessHandler {
        crate::application::handlers::entitlement::ListFeatureAccessHandler::new(
            self.subscription_store.clone(),
            self.admin_directory.clone(),
            self.clock.clone(),
            self.trial_days,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context (would come from auth middleware in production)
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated user context extracted from request.
///
/// In production, this would be extracted from JWT/session by auth middleware.
/// For now, uses a header-based extraction for development/testing.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    // Missing identity rejects through the same error type the handlers
    // use, so the 401 payload matches every other error response.
    type Rejection = EntitlementApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // In production, this would validate JWT token from Authorization header
            // For development, we accept an X-User-Id header
            let user_id = parts
                .headers
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| UserId::new(s).ok())
                .ok_or(EntitlementApiError(EntitlementError::Unauthenticated))?;

            let email = parts
                .headers
                .get("X-User-Email")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();

            Ok(AuthenticatedUser { user_id, email })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/entitlements/subscription - Get (or provision) the caller's subscription
pub async fn get_subscription(
    State(state): State<EntitlementAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, EntitlementApiError> {
    let handler = state.get_subscription_handler();
    let query = GetSubscriptionQuery {
        user_id: user.user_id,
        email: user.email,
    };

    let result = handler.handle(query).await?;

    Ok(Json(SubscriptionResponse::from(result)))
}

/// GET /api/entitlements/features - Decisions for every known feature
pub async fn list_features(
    State(state): State<EntitlementAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, EntitlementApiError> {
    let handler = state.list_features_handler();
    let query = ListFeatureAccessQuery {
        user_id: user.user_id,
        email: user.email,
    };

    let result = handler.handle(query).await?;

    Ok(Json(FeatureListResponse::from(result)))
}

/// GET /api/entitlements/features/:feature - Decision for a single feature key
///
/// Unknown keys are rejected rather than silently denied so misspelled
/// clients surface loudly.
pub async fn check_feature(
    State(state): State<EntitlementAppState>,
    Path(feature_key): Path<String>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, EntitlementApiError> {
    let feature = Feature::from_key(&feature_key)
        .ok_or_else(|| EntitlementError::unknown_feature(&feature_key))?;

    let handler = state.check_feature_handler();
    let query = CheckFeatureAccessQuery {
        user_id: user.user_id,
        email: user.email,
        feature,
    };

    let result = handler.handle(query).await?;

    let response = FeatureAccessResponse {
        feature: result.feature.as_key(),
        granted: result.decision.granted,
        upgrade_message: result.decision.upgrade_message,
    };

    Ok(Json(response))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
pub struct EntitlementApiError(EntitlementError);

impl From<EntitlementError> for EntitlementApiError {
    fn from(err: EntitlementError) -> Self {
        Self(err)
    }
}

impl From<crate::domain::foundation::DomainError> for EntitlementApiError {
    fn from(err: crate::domain::foundation::DomainError) -> Self {
        Self(EntitlementError::infrastructure(err.to_string()))
    }
}

impl IntoResponse for EntitlementApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            EntitlementError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "AUTHENTICATION_REQUIRED")
            }
            EntitlementError::UnknownFeature(_) => (StatusCode::NOT_FOUND, "UNKNOWN_FEATURE"),
            EntitlementError::ProvisioningFailed { .. } => {
                (StatusCode::BAD_GATEWAY, "PROVISIONING_FAILED")
            }
            EntitlementError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        // Use the error's built-in message() method for consistent messaging
        let message = self.0.message();
        let body = ErrorResponse::new(error_code, message);
        (status, Json(body)).into_response()
    }
}
