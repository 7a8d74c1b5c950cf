//! Admin role lookup port.
//!
//! A separate collaborator from subscription storage, on purpose: the
//! admin bypass must not depend on subscription storage being reachable,
//! and the lookup is performed as the calling user rather than
//! parameterized by arbitrary ids.
//!
//! # Fail-closed contract
//!
//! Implementations report errors; **callers** translate any error into
//! `false`. Ambiguity denies elevated access, never grants it.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// Port for resolving whether a user holds the admin role.
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Returns true if the user holds the admin role.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` when the lookup cannot be performed. Callers
    ///   must treat this as "not admin".
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct TestAdminDirectory {
        admins: HashSet<String>,
    }

    #[async_trait]
    impl AdminDirectory for TestAdminDirectory {
        async fn is_admin(&self, user_id: &UserId) -> Result<bool, DomainError> {
            Ok(self.admins.contains(user_id.as_str()))
        }
    }

    #[tokio::test]
    async fn directory_reports_admin_membership() {
        let directory = TestAdminDirectory {
            admins: HashSet::from(["admin-1".to_string()]),
        };

        assert!(directory
            .is_admin(&UserId::new("admin-1").unwrap())
            .await
            .unwrap());
        assert!(!directory
            .is_admin(&UserId::new("user-1").unwrap())
            .await
            .unwrap());
    }

    #[test]
    fn admin_directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn AdminDirectory) {}
    }
}
