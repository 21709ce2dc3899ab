//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use propshop_core::error::AppError;
use propshop_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Extracted from the access token and passed into service methods so
/// that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the JWT was issued.
    pub role: UserRole,
    /// The username (convenience field from JWT claims).
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, username: String) -> Self {
        Self {
            user_id,
            role,
            username,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fails with `Authorization` unless the caller is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization("Admin access required"))
        }
    }

    /// Fails with `Authorization` unless the caller is `owner` or an admin.
    pub fn require_self_or_admin(&self, owner: Uuid) -> Result<(), AppError> {
        if self.user_id == owner || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::authorization(
                "You are not allowed to access another user's data",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use propshop_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_self_or_admin() {
        let me = Uuid::new_v4();
        let user = RequestContext::new(me, UserRole::User, "maya".into());
        assert!(user.require_self_or_admin(me).is_ok());
        let err = user.require_self_or_admin(Uuid::new_v4()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let admin = RequestContext::new(Uuid::new_v4(), UserRole::Admin, "root".into());
        assert!(admin.require_self_or_admin(me).is_ok());
        assert!(admin.require_admin().is_ok());
        assert!(user.require_admin().is_err());
    }
}
