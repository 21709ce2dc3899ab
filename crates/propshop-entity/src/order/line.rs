//! Line items shared by carts and orders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How a line is fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "fulfillment_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentType {
    /// One-time sale.
    Purchase,
    /// Time-boxed rental priced per 7-day unit.
    Rental,
}

impl FulfillmentType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Rental => "rental",
        }
    }
}

impl fmt::Display for FulfillmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FulfillmentType {
    type Err = propshop_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(Self::Purchase),
            "rental" => Ok(Self::Rental),
            _ => Err(propshop_core::AppError::validation(format!(
                "Invalid type '{s}'. Must be 'purchase' or 'rental'"
            ))),
        }
    }
}

/// One (prop, quantity, type, rental days) tuple embedded in an order.
///
/// Lines have no identity of their own; they live inside the order's
/// `items` JSON column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Referenced prop. May point at a since-deleted prop.
    pub prop_id: Uuid,
    /// Units ordered.
    pub quantity: i32,
    /// Purchase or rental.
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
    /// Rental duration; `None` for purchases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_days: Option<i32>,
}
