//! Order entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

use super::line::{FulfillmentType, OrderLine};
use super::status::{OrderStatus, PaymentMethod, PaymentStatus};

/// A placed order. Immutable once created except for status fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    /// Unique order identifier.
    pub id: Uuid,
    /// Purchasing user.
    pub user_id: Uuid,
    /// Embedded line items in submission order.
    pub items: Json<Vec<OrderLine>>,
    /// Delivery fee charged on top of the lines.
    pub delivery_fee: Decimal,
    /// Server-verified total (subtotal + delivery fee).
    pub total_price: Decimal,
    /// How the customer pays.
    pub payment_method: PaymentMethod,
    /// Whether payment was collected.
    pub payment_status: PaymentStatus,
    /// Provider payment intent, unique across orders.
    pub payment_intent_id: Option<String>,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
}

impl Order {
    /// Line items.
    pub fn lines(&self) -> &[OrderLine] {
        &self.items.0
    }

    /// Sum of quantities across lines of the given type.
    pub fn quantity_of(&self, fulfillment_type: FulfillmentType) -> i64 {
        self.lines()
            .iter()
            .filter(|l| l.fulfillment_type == fulfillment_type)
            .map(|l| i64::from(l.quantity))
            .sum()
    }
}

/// Data for inserting an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    /// Purchasing user.
    pub user_id: Uuid,
    /// Verified line items.
    pub items: Vec<OrderLine>,
    /// Delivery fee.
    pub delivery_fee: Decimal,
    /// Verified total.
    pub total_price: Decimal,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Initial payment status.
    pub payment_status: PaymentStatus,
    /// Provider payment intent, if paid online.
    pub payment_intent_id: Option<String>,
}

impl NewOrder {
    /// Materialize as a stored order with a fresh id and Pending status.
    pub fn into_order(self) -> Order {
        Order {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            items: Json(self.items),
            delivery_fee: self.delivery_fee,
            total_price: self.total_price,
            payment_method: self.payment_method,
            payment_status: self.payment_status,
            payment_intent_id: self.payment_intent_id,
            status: OrderStatus::Pending,
            order_date: Utc::now(),
        }
    }
}
