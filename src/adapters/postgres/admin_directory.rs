//! PostgreSQL implementation of AdminDirectory.
//!
//! Admin role membership lives in its own table, separate from
//! subscriptions; a subscription outage never takes the admin bypass
//! down with it.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::AdminDirectory;

/// PostgreSQL implementation of the AdminDirectory port.
pub struct PostgresAdminDirectory {
    pool: PgPool,
}

impl PostgresAdminDirectory {
    /// Creates a new PostgresAdminDirectory with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminDirectory for PostgresAdminDirectory {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let user_uuid = Uuid::parse_str(user_id.as_str()).map_err(|e| {
            DomainError::new(
                ErrorCode::ValidationFailed,
                format!("User ID must be a valid UUID: {}", e),
            )
        })?;

        let is_admin: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM admin_roles WHERE user_id = $1)",
        )
        .bind(user_uuid)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check admin role: {}", e),
            )
        })?;

        Ok(is_admin)
    }
}
