//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::severity::{NotificationSeverity, RelatedEntity};

/// A system message addressed to one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Recipient user.
    pub user_id: Uuid,
    /// Message text.
    pub message: String,
    /// Display severity.
    #[serde(rename = "type")]
    pub severity: NotificationSeverity,
    /// Whether the recipient has read it. The only mutable field.
    pub is_read: bool,
    /// Related entity id, if any.
    pub related_id: Option<Uuid>,
    /// Related entity kind, if any.
    pub related_model: Option<RelatedEntity>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification is still unread.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Data for creating a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// Recipient user.
    pub user_id: Uuid,
    /// Message text.
    pub message: String,
    /// Display severity.
    pub severity: NotificationSeverity,
    /// Related entity id.
    pub related_id: Option<Uuid>,
    /// Related entity kind.
    pub related_model: Option<RelatedEntity>,
}

impl NewNotification {
    /// Notification pointing at an order.
    pub fn for_order(
        user_id: Uuid,
        order_id: Uuid,
        message: impl Into<String>,
        severity: NotificationSeverity,
    ) -> Self {
        Self {
            user_id,
            message: message.into(),
            severity,
            related_id: Some(order_id),
            related_model: Some(RelatedEntity::Order),
        }
    }

    /// Notification pointing at a prop request.
    pub fn for_prop_request(
        user_id: Uuid,
        request_id: Uuid,
        message: impl Into<String>,
        severity: NotificationSeverity,
    ) -> Self {
        Self {
            user_id,
            message: message.into(),
            severity,
            related_id: Some(request_id),
            related_model: Some(RelatedEntity::PropRequest),
        }
    }

    /// Materialize as an unread stored notification.
    pub fn into_notification(self) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            message: self.message,
            severity: self.severity,
            is_read: false,
            related_id: self.related_id,
            related_model: self.related_model,
            created_at: Utc::now(),
        }
    }
}
