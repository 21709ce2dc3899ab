//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered customer or administrator.
///
/// Accounts are created by the account service; this service reads them to
/// resolve notification recipients and display names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Full display name.
    pub full_name: Option<String>,
    /// Email address.
    pub email: String,
    /// Contact phone number.
    pub contact_no: Option<String>,
    /// Role.
    pub role: UserRole,
    /// Delivery address.
    pub address: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Full name when set, else the username.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Short form embedded in admin listings.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Requester/recipient details shown to administrators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Full name.
    pub full_name: Option<String>,
    /// Email.
    pub email: String,
}

/// Data required to create a user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Full name.
    pub full_name: Option<String>,
    /// Email address.
    pub email: String,
    /// Contact phone number.
    pub contact_no: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Delivery address.
    pub address: Option<String>,
}

impl CreateUser {
    /// Materialize as a stored user.
    pub fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            username: self.username,
            full_name: self.full_name,
            email: self.email,
            contact_no: self.contact_no,
            role: self.role,
            address: self.address,
            created_at: Utc::now(),
        }
    }
}
