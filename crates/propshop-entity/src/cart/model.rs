//! Cart line entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::order::FulfillmentType;

/// One prop in a user's cart. Unique per (user, prop).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartLine {
    /// Unique line identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Referenced prop.
    pub prop_id: Uuid,
    /// Desired quantity (≥ 1).
    pub quantity: i32,
    /// Purchase or rental.
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
    /// Rental duration; set only for rentals.
    pub rental_days: Option<i32>,
    /// When the line was first added.
    pub added_at: DateTime<Utc>,
}

/// Values written by add/merge and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCartLine {
    /// Owning user.
    pub user_id: Uuid,
    /// Referenced prop.
    pub prop_id: Uuid,
    /// Quantity to add (on merge) or set (on insert).
    pub quantity: i32,
    /// Purchase or rental.
    pub fulfillment_type: FulfillmentType,
    /// Rental duration; `None` unless rental.
    pub rental_days: Option<i32>,
}
