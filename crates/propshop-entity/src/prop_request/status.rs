//! Prop request enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use propshop_core::AppError;

/// How urgently the requester needs the prop.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "request_urgency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Low.
    Low,
    /// Normal.
    #[default]
    Normal,
    /// High.
    High,
}

/// Why the prop is being requested.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "request_reason", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RequestReason {
    /// The prop is not in the catalog.
    #[default]
    NotInSystem,
    /// The prop exists but has no stock.
    OutOfStock,
    /// A newly released item.
    NewRelease,
    /// Anything else.
    Other,
}

/// Admin decision on a request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Accepted.
    Approved,
    /// Declined.
    Rejected,
    /// Prop sourced.
    Fulfilled,
}

impl RequestStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Fulfilled => "fulfilled",
        }
    }

    /// Whether the transition is good news for the requester.
    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Approved | Self::Fulfilled)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "fulfilled" => Ok(Self::Fulfilled),
            _ => Err(AppError::validation(format!("Invalid status: {s}"))),
        }
    }
}
