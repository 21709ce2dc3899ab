//! Prop request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{RequestReason, RequestStatus, Urgency};

/// A user's request for a prop the shop does not carry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PropRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// Requesting user.
    pub user_id: Uuid,
    /// Requested prop name (trimmed).
    pub prop_name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Urgency.
    pub urgency: Urgency,
    /// Reason for the request.
    pub reason: RequestReason,
    /// Extra details.
    pub additional_info: Option<String>,
    /// Review status.
    pub status: RequestStatus,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
    /// When the request was last changed.
    pub updated_at: DateTime<Utc>,
}

/// Data for submitting a prop request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePropRequest {
    /// Requesting user.
    pub user_id: Uuid,
    /// Requested prop name, already trimmed.
    pub prop_name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Urgency.
    pub urgency: Urgency,
    /// Reason.
    pub reason: RequestReason,
    /// Extra details.
    pub additional_info: Option<String>,
}

impl CreatePropRequest {
    /// Materialize as a pending stored request.
    pub fn into_request(self) -> PropRequest {
        let now = Utc::now();
        PropRequest {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            prop_name: self.prop_name,
            description: self.description,
            urgency: self.urgency,
            reason: self.reason,
            additional_info: self.additional_info,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}
