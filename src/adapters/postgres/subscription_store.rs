//! PostgreSQL implementation of SubscriptionStore.
//!
//! Provides persistent storage for subscription records using PostgreSQL.
//! Provisioning uses `INSERT ... ON CONFLICT DO NOTHING` against the
//! unique `user_id` constraint, so two concurrent first-fetches for the
//! same user converge on the single winning row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entitlement::RawSubscriptionRecord;
use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::ports::{NewSubscription, SubscriptionStore};

/// PostgreSQL implementation of the SubscriptionStore port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    /// Creates a new PostgresSubscriptionStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    #[allow(dead_code)]
    id: Uuid,
    #[allow(dead_code)]
    user_id: Uuid,
    plan_slug: Option<String>,
    subscription_tier: Option<String>,
    trial_starts_at: Option<DateTime<Utc>>,
    trial_ends_at: Option<DateTime<Utc>>,
    subscribed: bool,
}

impl From<SubscriptionRow> for RawSubscriptionRecord {
    fn from(row: SubscriptionRow) -> Self {
        RawSubscriptionRecord {
            plan_slug: row.plan_slug,
            subscription_tier: row.subscription_tier,
            trial_starts_at: row.trial_starts_at.map(Timestamp::from_datetime),
            trial_ends_at: row.trial_ends_at.map(Timestamp::from_datetime),
            subscribed: row.subscribed,
        }
    }
}

fn parse_user_id_as_uuid(user_id: &UserId) -> Result<Uuid, DomainError> {
    Uuid::parse_str(user_id.as_str()).map_err(|e| {
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("User ID must be a valid UUID: {}", e),
        )
    })
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<RawSubscriptionRecord>, DomainError> {
        let user_uuid = parse_user_id_as_uuid(user_id)?;

        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, plan_slug, subscription_tier,
                   trial_starts_at, trial_ends_at, subscribed
            FROM subscriptions
            WHERE user_id = $1
            "#,
        )
        .bind(user_uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find subscription: {}", e),
            )
        })?;

        Ok(row.map(RawSubscriptionRecord::from))
    }

    async fn insert(
        &self,
        subscription: NewSubscription,
    ) -> Result<RawSubscriptionRecord, DomainError> {
        let user_uuid = parse_user_id_as_uuid(&subscription.user_id)?;

        let inserted: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            INSERT INTO subscriptions (
                id, user_id, email, plan_slug, subscribed,
                trial_starts_at, trial_ends_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, now(), now())
            ON CONFLICT (user_id) DO NOTHING
            RETURNING id, user_id, plan_slug, subscription_tier,
                      trial_starts_at, trial_ends_at, subscribed
            "#,
        )
        .bind(*SubscriptionId::new().as_uuid())
        .bind(user_uuid)
        .bind(&subscription.email)
        .bind(subscription.plan.as_slug())
        .bind(subscription.subscribed)
        .bind(subscription.trial.starts_at.as_datetime())
        .bind(subscription.trial.ends_at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert subscription: {}", e),
            )
        })?;

        if let Some(row) = inserted {
            return Ok(row.into());
        }

        // The insert lost a provisioning race; the winner's row is the
        // record now.
        self.find_by_user(&subscription.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SubscriptionExists,
                    "Subscription insert conflicted but row not found on re-read",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_user_id_as_uuid_accepts_valid_uuid() {
        let user_id = UserId::new("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(parse_user_id_as_uuid(&user_id).is_ok());
    }

    #[test]
    fn parse_user_id_as_uuid_rejects_invalid_uuid() {
        let user_id = UserId::new("not-a-uuid").unwrap();
        assert!(parse_user_id_as_uuid(&user_id).is_err());
    }

    #[test]
    fn row_converts_to_raw_record() {
        let now = Utc::now();
        let row = SubscriptionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_slug: Some("pro".to_string()),
            subscription_tier: None,
            trial_starts_at: Some(now),
            trial_ends_at: Some(now + chrono::Duration::days(7)),
            subscribed: true,
        };

        let record = RawSubscriptionRecord::from(row);
        assert_eq!(record.plan_slug.as_deref(), Some("pro"));
        assert!(record.subscribed);
        assert!(record.trial_ends_at.is_some());
    }

    #[test]
    fn legacy_row_keeps_its_tier_field() {
        let row = SubscriptionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_slug: None,
            subscription_tier: Some("premium".to_string()),
            trial_starts_at: None,
            trial_ends_at: None,
            subscribed: true,
        };

        let record = RawSubscriptionRecord::from(row);
        assert_eq!(record.subscription_tier.as_deref(), Some("premium"));
        assert!(record.plan_slug.is_none());
    }
}
