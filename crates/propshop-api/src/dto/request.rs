//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use propshop_entity::order::{FulfillmentType, OrderLine, OrderStatus, PaymentMethod, PaymentStatus};
use propshop_entity::prop::{CreateProp, PropCategory, UpdateProp};
use propshop_entity::prop_request::{RequestReason, RequestStatus, Urgency};
use propshop_service::cart::{AddToCart, UpdateCartLine};
use propshop_service::checkout::{CheckoutRequest, PlaceOrderRequest};
use propshop_service::order::UpdateOrderStatus;
use propshop_service::prop_request::SubmitPropRequest;

/// One ordered line.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderLineBody {
    /// Prop.
    pub prop_id: Uuid,
    /// Units.
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    /// Purchase or rental.
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
    /// Rental duration in days.
    #[serde(default, alias = "rentalDays")]
    pub rental_days: Option<i32>,
}

impl From<OrderLineBody> for OrderLine {
    fn from(body: OrderLineBody) -> Self {
        OrderLine {
            prop_id: body.prop_id,
            quantity: body.quantity,
            fulfillment_type: body.fulfillment_type,
            rental_days: body.rental_days,
        }
    }
}

/// Direct order placement.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceOrderBody {
    /// Purchasing user.
    pub user_id: Uuid,
    /// Lines.
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderLineBody>,
    /// Delivery fee.
    #[serde(default, alias = "deliveryFee")]
    pub delivery_fee: Decimal,
    /// Client-computed total.
    pub total_price: Decimal,
    /// `cod` or `online`.
    #[serde(alias = "paymentMethod")]
    pub payment_method: PaymentMethod,
    /// Provider payment intent for online payment.
    #[serde(default, alias = "paymentIntentId")]
    pub payment_intent_id: Option<String>,
}

impl From<PlaceOrderBody> for PlaceOrderRequest {
    fn from(body: PlaceOrderBody) -> Self {
        PlaceOrderRequest {
            user_id: body.user_id,
            items: body.items.into_iter().map(Into::into).collect(),
            delivery_fee: body.delivery_fee,
            total_price: body.total_price,
            payment_method: body.payment_method,
            payment_intent_id: body.payment_intent_id,
        }
    }
}

/// Hosted checkout session creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutSessionBody {
    /// Purchasing user.
    pub user_id: Uuid,
    /// Lines.
    #[validate(length(min = 1, message = "Checkout must contain at least one item"), nested)]
    pub items: Vec<OrderLineBody>,
    /// Delivery fee.
    #[serde(default, alias = "deliveryFee")]
    pub delivery_fee: Decimal,
    /// Client-computed total.
    pub total_price: Decimal,
}

impl From<CheckoutSessionBody> for CheckoutRequest {
    fn from(body: CheckoutSessionBody) -> Self {
        CheckoutRequest {
            user_id: body.user_id,
            items: body.items.into_iter().map(Into::into).collect(),
            delivery_fee: body.delivery_fee,
            total_price: body.total_price,
        }
    }
}

/// Admin order status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusBody {
    /// Fulfilment status.
    pub status: Option<OrderStatus>,
    /// Payment status.
    #[serde(default, alias = "paymentStatus")]
    pub payment_status: Option<PaymentStatus>,
}

impl From<UpdateOrderStatusBody> for UpdateOrderStatus {
    fn from(body: UpdateOrderStatusBody) -> Self {
        UpdateOrderStatus {
            status: body.status,
            payment_status: body.payment_status,
        }
    }
}

/// Add a prop to a cart.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddToCartBody {
    /// Cart owner.
    pub user_id: Uuid,
    /// Prop.
    pub prop_id: Uuid,
    /// Units to add, default 1.
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
    /// Purchase or rental.
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
    /// Rental duration in days.
    #[serde(default, alias = "rentalDays")]
    pub rental_days: Option<i32>,
}

impl From<AddToCartBody> for AddToCart {
    fn from(body: AddToCartBody) -> Self {
        AddToCart {
            user_id: body.user_id,
            prop_id: body.prop_id,
            quantity: body.quantity,
            fulfillment_type: body.fulfillment_type,
            rental_days: body.rental_days,
        }
    }
}

/// Change a cart line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCartLineBody {
    /// New quantity; 0 removes the line.
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
    /// New type.
    #[serde(default, rename = "type")]
    pub fulfillment_type: Option<FulfillmentType>,
    /// New rental duration.
    #[serde(default, alias = "rentalDays")]
    pub rental_days: Option<i32>,
}

impl From<UpdateCartLineBody> for UpdateCartLine {
    fn from(body: UpdateCartLineBody) -> Self {
        UpdateCartLine {
            quantity: body.quantity,
            fulfillment_type: body.fulfillment_type,
            rental_days: body.rental_days,
        }
    }
}

/// Prop request submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitPropRequestBody {
    /// Requesting user.
    pub user_id: Uuid,
    /// Requested prop.
    #[validate(length(min = 1, max = 200, message = "Prop name is required"))]
    pub prop_name: String,
    /// Description.
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Urgency.
    pub urgency: Option<Urgency>,
    /// Reason.
    pub reason: Option<RequestReason>,
    /// Extra details.
    #[validate(length(max = 2000))]
    pub additional_info: Option<String>,
}

impl From<SubmitPropRequestBody> for SubmitPropRequest {
    fn from(body: SubmitPropRequestBody) -> Self {
        SubmitPropRequest {
            user_id: body.user_id,
            prop_name: body.prop_name,
            description: body.description,
            urgency: body.urgency,
            reason: body.reason,
            additional_info: body.additional_info,
        }
    }
}

/// Admin review of a prop request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePropRequestBody {
    /// New status.
    pub status: RequestStatus,
}

/// New catalog prop.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePropBody {
    /// Name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Image reference.
    #[serde(default)]
    pub image: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Categories.
    #[validate(length(min = 1, message = "At least one category is required"))]
    pub categories: Vec<PropCategory>,
    /// Sale price.
    pub purchase_price: Decimal,
    /// Rental price per 7 days.
    pub rental_price: Decimal,
    /// Stock.
    #[validate(range(min = 0))]
    pub available_stock: i32,
    /// Discount window configured.
    #[serde(default)]
    pub has_discount: bool,
    /// Discount kind.
    pub discount_type: Option<String>,
    /// Discount percentage.
    pub discount_percent: Option<Decimal>,
    /// Discount start.
    pub discount_start: Option<DateTime<Utc>>,
    /// Discount end.
    pub discount_end: Option<DateTime<Utc>>,
}

impl From<CreatePropBody> for CreateProp {
    fn from(body: CreatePropBody) -> Self {
        CreateProp {
            name: body.name,
            image: body.image,
            description: body.description,
            categories: body.categories,
            purchase_price: body.purchase_price,
            rental_price: body.rental_price,
            available_stock: body.available_stock,
            has_discount: body.has_discount,
            discount_type: body.discount_type,
            discount_percent: body.discount_percent,
            discount_start: body.discount_start,
            discount_end: body.discount_end,
        }
    }
}

/// Partial catalog update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePropBody {
    /// Name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// Image reference.
    pub image: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Categories.
    #[validate(length(min = 1, message = "At least one category is required"))]
    pub categories: Option<Vec<PropCategory>>,
    /// Sale price.
    pub purchase_price: Option<Decimal>,
    /// Rental price per 7 days.
    pub rental_price: Option<Decimal>,
    /// Stock.
    #[validate(range(min = 0))]
    pub available_stock: Option<i32>,
    /// Discount window configured.
    pub has_discount: Option<bool>,
    /// Discount kind.
    pub discount_type: Option<String>,
    /// Discount percentage.
    pub discount_percent: Option<Decimal>,
    /// Discount start.
    pub discount_start: Option<DateTime<Utc>>,
    /// Discount end.
    pub discount_end: Option<DateTime<Utc>>,
}

impl From<UpdatePropBody> for UpdateProp {
    fn from(body: UpdatePropBody) -> Self {
        UpdateProp {
            name: body.name,
            image: body.image,
            description: body.description,
            categories: body.categories,
            purchase_price: body.purchase_price,
            rental_price: body.rental_price,
            available_stock: body.available_stock,
            has_discount: body.has_discount,
            discount_type: body.discount_type,
            discount_percent: body.discount_percent,
            discount_start: body.discount_start,
            discount_end: body.discount_end,
        }
    }
}
