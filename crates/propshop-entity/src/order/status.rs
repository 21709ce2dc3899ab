//! Order status, payment method, and payment status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use propshop_core::AppError;

/// Fulfilment progress of an order.
///
/// The intended flow is Pending → Processing → Shipped → Delivered; admins
/// may set any member of the enum.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "order_status")]
pub enum OrderStatus {
    /// Placed, not yet picked.
    #[default]
    Pending,
    /// Being prepared.
    Processing,
    /// Handed to delivery.
    Shipped,
    /// Received by the customer.
    Delivered,
}

impl OrderStatus {
    /// Return the status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            _ => Err(AppError::validation(format!(
                "Invalid status '{s}'. Expected one of: Pending, Processing, Shipped, Delivered"
            ))),
        }
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Pay on fulfilment (cash on delivery).
    Cod,
    /// Paid through the hosted checkout provider.
    Online,
}

impl PaymentMethod {
    /// Payment status an order starts with.
    pub fn initial_payment_status(&self) -> PaymentStatus {
        match self {
            Self::Cod => PaymentStatus::NotDone,
            Self::Online => PaymentStatus::Done,
        }
    }

    /// Return the method as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Online => "online",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether payment has been collected.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "payment_status")]
pub enum PaymentStatus {
    /// Collected.
    #[serde(rename = "done")]
    #[sqlx(rename = "done")]
    Done,
    /// Outstanding.
    #[default]
    #[serde(rename = "not done")]
    #[sqlx(rename = "not done")]
    NotDone,
}

impl PaymentStatus {
    /// Return the status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::NotDone => "not done",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
