//! Order listing, status administration, and per-user summaries.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use propshop_core::error::AppError;
use propshop_core::result::AppResult;
use propshop_database::store::{CatalogStore, OrderStore};
use propshop_entity::order::{FulfillmentType, Order, OrderStatus, PaymentStatus};

use crate::context::RequestContext;

/// Admin status change. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrderStatus {
    /// New fulfilment status.
    pub status: Option<OrderStatus>,
    /// New payment status.
    pub payment_status: Option<PaymentStatus>,
}

/// Whether a payment intent already produced an order.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentIntentCheck {
    /// An order exists for the intent.
    pub exists: bool,
    /// The order, when it exists.
    pub order: Option<Order>,
}

/// Quantity totals across a user's orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderCounts {
    /// Units bought.
    pub purchase_count: i64,
    /// Units rented.
    pub rent_count: i64,
}

/// One delivered rental line.
#[derive(Debug, Clone, Serialize)]
pub struct RentedProp {
    /// Prop id.
    pub prop_id: Uuid,
    /// Prop name.
    pub name: String,
    /// Units on the line.
    pub quantity: i32,
    /// Current rental price.
    pub rental_price: Decimal,
    /// Prop image.
    pub image: String,
}

/// Props a user currently holds on rental.
#[derive(Debug, Clone, Serialize)]
pub struct RentedProps {
    /// Total units across all lines.
    pub count: i64,
    /// Rental lines of delivered orders.
    pub props: Vec<RentedProp>,
}

/// Order read and admin operations.
#[derive(Debug, Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    catalog: Arc<dyn CatalogStore>,
}

impl OrderService {
    /// Creates a new order service.
    pub fn new(orders: Arc<dyn OrderStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { orders, catalog }
    }

    /// Orders of one user, newest first.
    pub async fn list_for_user(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<Vec<Order>> {
        ctx.require_self_or_admin(user_id)?;
        self.orders.list_for_user(user_id).await
    }

    /// Every order, newest first. `NotFound` when there are none.
    pub async fn list_all(&self, ctx: &RequestContext) -> AppResult<Vec<Order>> {
        ctx.require_admin()?;
        let orders = self.orders.list_all().await?;
        if orders.is_empty() {
            return Err(AppError::not_found("No orders found"));
        }
        Ok(orders)
    }

    /// Updates fulfilment and/or payment status.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        update: UpdateOrderStatus,
    ) -> AppResult<Order> {
        ctx.require_admin()?;
        if update.status.is_none() && update.payment_status.is_none() {
            return Err(AppError::validation(
                "Provide status or payment_status to update",
            ));
        }

        let order = self
            .orders
            .update_status(id, update.status, update.payment_status)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))?;

        info!(
            order_id = %id,
            status = %order.status,
            payment_status = %order.payment_status,
            admin = %ctx.username,
            "Order status updated"
        );
        Ok(order)
    }

    /// Deletes an order.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;
        if !self.orders.delete(id).await? {
            return Err(AppError::not_found(format!("Order {id} not found")));
        }
        info!(order_id = %id, admin = %ctx.username, "Order deleted");
        Ok(())
    }

    /// Looks up the order created for a payment intent.
    pub async fn check_payment_intent(
        &self,
        ctx: &RequestContext,
        payment_intent_id: &str,
    ) -> AppResult<PaymentIntentCheck> {
        match self.orders.find_by_payment_intent(payment_intent_id).await? {
            Some(order) => {
                if order.user_id != ctx.user_id {
                    return Err(AppError::authorization("Unauthorized access to order"));
                }
                Ok(PaymentIntentCheck {
                    exists: true,
                    order: Some(order),
                })
            }
            None => Ok(PaymentIntentCheck {
                exists: false,
                order: None,
            }),
        }
    }

    /// Purchased and rented unit totals for a user.
    pub async fn counts(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<OrderCounts> {
        ctx.require_self_or_admin(user_id)?;
        let orders = self.orders.list_for_user(user_id).await?;
        Ok(OrderCounts {
            purchase_count: orders
                .iter()
                .map(|o| o.quantity_of(FulfillmentType::Purchase))
                .sum(),
            rent_count: orders
                .iter()
                .map(|o| o.quantity_of(FulfillmentType::Rental))
                .sum(),
        })
    }

    /// Rental lines of the user's delivered orders.
    ///
    /// Lines whose prop has since been deleted are skipped.
    pub async fn currently_rented(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> AppResult<RentedProps> {
        ctx.require_self_or_admin(user_id)?;

        let orders = self.orders.list_for_user(user_id).await?;
        let lines: Vec<_> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .flat_map(|o| o.lines())
            .filter(|l| l.fulfillment_type == FulfillmentType::Rental)
            .collect();

        let mut ids: Vec<Uuid> = lines.iter().map(|l| l.prop_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let props: HashMap<Uuid, _> = self
            .catalog
            .find_props(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let props: Vec<RentedProp> = lines
            .into_iter()
            .filter_map(|line| {
                props.get(&line.prop_id).map(|prop| RentedProp {
                    prop_id: prop.id,
                    name: prop.name.clone(),
                    quantity: line.quantity,
                    rental_price: prop.rental_price,
                    image: prop.image.clone(),
                })
            })
            .collect();

        Ok(RentedProps {
            count: props.iter().map(|p| i64::from(p.quantity)).sum(),
            props,
        })
    }
}
