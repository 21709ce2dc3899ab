//! Notification severity and related-entity tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display severity of a notification.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "notification_severity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationSeverity {
    /// Informational.
    #[default]
    Info,
    /// Positive outcome.
    Success,
    /// Needs attention; the admin feed shows only these.
    Warning,
    /// Negative outcome.
    Error,
}

impl fmt::Display for NotificationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// Kind of entity a notification points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "related_entity")]
pub enum RelatedEntity {
    /// An order.
    Order,
    /// A prop request.
    PropRequest,
}
