//! Checkout orchestrator.
//!
//! Two paths create orders: direct placement by the client and the
//! provider's `checkout.session.completed` webhook. Both insert through
//! [`OrderStore::insert`], whose payment-intent uniqueness turns a racing
//! second insert into a `Conflict` that is handled here as success.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use propshop_core::config::PaymentConfig;
use propshop_core::error::{AppError, ErrorKind};
use propshop_core::result::AppResult;
use propshop_core::traits::{
    CheckoutSession, CheckoutSessionRequest, GatewayLineItem, PaymentGateway,
};
use propshop_database::store::{CartStore, CatalogStore, OrderStore};
use propshop_entity::order::{
    FulfillmentType, NewOrder, Order, OrderLine, PaymentMethod, PaymentStatus,
};
use propshop_payment::webhook::{self, CHECKOUT_SESSION_COMPLETED};

use super::metadata::CheckoutMetadata;
use crate::context::RequestContext;
use crate::notification::NotificationService;
use crate::pricing::{self, PricedCart};

/// Direct order placement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Purchasing user; must be the caller.
    pub user_id: Uuid,
    /// Lines to order.
    pub items: Vec<OrderLine>,
    /// Delivery fee.
    pub delivery_fee: Decimal,
    /// Client-computed total, verified against the server total.
    pub total_price: Decimal,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Provider payment intent; required for online payment.
    pub payment_intent_id: Option<String>,
}

/// Hosted checkout session request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Purchasing user; must be the caller.
    pub user_id: Uuid,
    /// Lines to pay for.
    pub items: Vec<OrderLine>,
    /// Delivery fee.
    pub delivery_fee: Decimal,
    /// Client-computed total.
    pub total_price: Decimal,
}

/// Result of direct placement.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    /// The order.
    pub order: Order,
    /// `false` when the payment intent had already produced this order.
    pub created: bool,
}

/// A newly created hosted checkout session.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionCreated {
    /// Provider session id.
    pub session_id: String,
    /// Hosted page URL.
    pub url: String,
}

/// Session details returned to the paying user.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSessionSummary {
    /// Metadata attached at creation.
    pub metadata: BTreeMap<String, String>,
    /// Payment intent, once the session is paid.
    pub payment_intent: Option<String>,
}

/// What a verified webhook delivery did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Event type not handled.
    Ignored,
    /// A new order was created.
    Created(Uuid),
    /// The payment intent already had an order.
    Duplicate(Uuid),
    /// Processing failed after verification; details were logged.
    Failed,
}

/// Orchestrates pricing verification, order creation, and fan-out.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
    cart: Arc<dyn CartStore>,
    gateway: Arc<dyn PaymentGateway>,
    notifications: Arc<NotificationService>,
    config: PaymentConfig,
}

/// Convert a decimal amount to provider minor units.
fn minor_units(amount: Decimal) -> AppResult<i64> {
    (amount * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| AppError::validation(format!("Amount out of range: {amount}")))
}

/// Provider line items for a priced cart, delivery fee last.
fn gateway_line_items(
    priced: &PricedCart,
    delivery_fee: Decimal,
) -> AppResult<Vec<GatewayLineItem>> {
    let mut line_items = Vec::with_capacity(priced.lines.len() + 1);
    for line in &priced.lines {
        let name = match line.line.fulfillment_type {
            FulfillmentType::Purchase => line.prop.name.clone(),
            FulfillmentType::Rental => format!(
                "{} (rental, {} days)",
                line.prop.name,
                line.line.rental_days.unwrap_or_default()
            ),
        };
        line_items.push(GatewayLineItem {
            name,
            unit_amount: minor_units(line.unit_price)?,
            quantity: i64::from(line.line.quantity),
        });
    }
    if delivery_fee > Decimal::ZERO {
        line_items.push(GatewayLineItem {
            name: "Delivery Fee".to_string(),
            unit_amount: minor_units(delivery_fee)?,
            quantity: 1,
        });
    }
    Ok(line_items)
}

/// Amount the provider charges for the given line items.
fn charge_amount(line_items: &[GatewayLineItem]) -> AppResult<i64> {
    line_items.iter().try_fold(0i64, |acc, item| {
        item.unit_amount
            .checked_mul(item.quantity)
            .and_then(|line| acc.checked_add(line))
            .ok_or_else(|| AppError::validation("Order amount out of range"))
    })
}

impl CheckoutService {
    /// Creates a new checkout service.
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        orders: Arc<dyn OrderStore>,
        cart: Arc<dyn CartStore>,
        gateway: Arc<dyn PaymentGateway>,
        notifications: Arc<NotificationService>,
        config: PaymentConfig,
    ) -> Self {
        Self {
            catalog,
            orders,
            cart,
            gateway,
            notifications,
            config,
        }
    }

    fn require_online_payments(&self) -> AppResult<()> {
        if !self.config.enabled {
            return Err(AppError::validation("Online payments are disabled"));
        }
        Ok(())
    }

    /// Re-price lines and verify the client's total.
    async fn verify(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        items: &[OrderLine],
        delivery_fee: Decimal,
        claimed_total: Decimal,
    ) -> AppResult<(PricedCart, Decimal)> {
        if ctx.user_id != user_id {
            return Err(AppError::authorization("User ID mismatch"));
        }
        if delivery_fee < Decimal::ZERO {
            return Err(AppError::validation("Delivery fee cannot be negative"));
        }

        let priced = pricing::price_lines(self.catalog.as_ref(), items).await?;
        let total = priced
            .verify_total(delivery_fee, claimed_total)
            .inspect_err(|_| {
                warn!(
                    user_id = %user_id,
                    claimed = %claimed_total,
                    subtotal = %priced.subtotal,
                    delivery_fee = %delivery_fee,
                    "Total mismatch on checkout; possible tampering attempt"
                );
            })?;
        Ok((priced, total))
    }

    /// Insert an order, treating a duplicate payment intent as success.
    async fn insert_once(&self, order: NewOrder) -> AppResult<PlacedOrder> {
        let intent = order.payment_intent_id.clone();
        match self.orders.insert(order).await {
            Ok(order) => Ok(PlacedOrder {
                order,
                created: true,
            }),
            Err(e) if e.is(ErrorKind::Conflict) => {
                let intent = intent.unwrap_or_default();
                info!(payment_intent_id = %intent, "Order already exists for payment intent");
                let existing = self
                    .orders
                    .find_by_payment_intent(&intent)
                    .await?
                    .ok_or_else(|| {
                        AppError::internal("Conflicting order vanished after insert")
                    })?;
                Ok(PlacedOrder {
                    order: existing,
                    created: false,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Places an order directly.
    ///
    /// Cash-on-delivery orders start `not done`. Online orders require a
    /// succeeded payment intent issued to the caller for exactly the
    /// order's amount.
    pub async fn place_order(
        &self,
        ctx: &RequestContext,
        req: PlaceOrderRequest,
    ) -> AppResult<PlacedOrder> {
        let (priced, total) = self
            .verify(ctx, req.user_id, &req.items, req.delivery_fee, req.total_price)
            .await?;

        let payment_intent_id = match req.payment_method {
            PaymentMethod::Cod => None,
            PaymentMethod::Online => {
                self.require_online_payments()?;
                let Some(intent_id) = req.payment_intent_id.filter(|s| !s.trim().is_empty())
                else {
                    return Err(AppError::validation(
                        "Online payment requires a payment_intent_id",
                    ));
                };
                let intent = self.gateway.retrieve_payment_intent(&intent_id).await?;
                if !intent.is_succeeded() {
                    return Err(AppError::validation(format!(
                        "Payment intent {intent_id} has not succeeded (status: {})",
                        intent.status
                    )));
                }
                if CheckoutMetadata::owner_of(&intent.metadata) != Some(ctx.user_id) {
                    warn!(
                        user_id = %ctx.user_id,
                        payment_intent_id = %intent_id,
                        "Payment intent not issued to caller"
                    );
                    return Err(AppError::authorization(
                        "Payment intent belongs to another user",
                    ));
                }
                let expected = charge_amount(&gateway_line_items(&priced, req.delivery_fee)?)?;
                if intent.amount != expected {
                    warn!(
                        user_id = %ctx.user_id,
                        payment_intent_id = %intent_id,
                        paid = intent.amount,
                        expected,
                        "Payment intent amount does not match order total"
                    );
                    return Err(AppError::total_mismatch(format!(
                        "Payment intent {intent_id} paid {} but the order costs {expected}",
                        intent.amount
                    )));
                }
                Some(intent_id)
            }
        };

        let placed = self
            .insert_once(NewOrder {
                user_id: req.user_id,
                items: priced.lines.iter().map(|l| l.line.clone()).collect(),
                delivery_fee: req.delivery_fee,
                total_price: total,
                payment_method: req.payment_method,
                payment_status: req.payment_method.initial_payment_status(),
                payment_intent_id,
            })
            .await?;

        if placed.created {
            info!(
                order_id = %placed.order.id,
                user_id = %placed.order.user_id,
                total = %placed.order.total_price,
                method = %placed.order.payment_method,
                "Order placed"
            );
            self.notifications.notify_order_placed(&placed.order).await;
        } else if placed.order.user_id != ctx.user_id {
            return Err(AppError::authorization(
                "Payment intent belongs to another user",
            ));
        }

        Ok(placed)
    }

    /// Creates a hosted checkout session for a verified cart.
    pub async fn create_checkout_session(
        &self,
        ctx: &RequestContext,
        req: CheckoutRequest,
    ) -> AppResult<CheckoutSessionCreated> {
        self.require_online_payments()?;
        let (priced, total) = self
            .verify(ctx, req.user_id, &req.items, req.delivery_fee, req.total_price)
            .await?;

        let line_items = gateway_line_items(&priced, req.delivery_fee)?;

        let metadata = CheckoutMetadata {
            user_id: req.user_id,
            items: priced.lines.iter().map(|l| l.line.clone()).collect(),
            delivery_fee: req.delivery_fee,
            total_price: total,
        }
        .to_map()?;

        let session = self
            .gateway
            .create_checkout_session(&CheckoutSessionRequest {
                line_items,
                currency: self.config.currency.clone(),
                success_url: self.config.success_url.clone(),
                cancel_url: self.config.cancel_url.clone(),
                metadata,
            })
            .await?;

        let url = session.url.ok_or_else(|| {
            AppError::external_service("Checkout session was created without a URL")
        })?;

        info!(
            session_id = %session.id,
            user_id = %req.user_id,
            total = %total,
            provider = self.gateway.provider_name(),
            "Checkout session created"
        );
        Ok(CheckoutSessionCreated {
            session_id: session.id,
            url,
        })
    }

    /// Retrieves a session the caller created.
    pub async fn retrieve_checkout_session(
        &self,
        ctx: &RequestContext,
        session_id: &str,
    ) -> AppResult<CheckoutSessionSummary> {
        let session = self.gateway.retrieve_checkout_session(session_id).await?;
        if CheckoutMetadata::owner_of(&session.metadata) != Some(ctx.user_id) {
            return Err(AppError::authorization(
                "Checkout session belongs to another user",
            ));
        }
        Ok(CheckoutSessionSummary {
            metadata: session.metadata,
            payment_intent: session.payment_intent,
        })
    }

    /// Handles a provider webhook delivery.
    ///
    /// Fails only when the signature is missing or invalid. After a valid
    /// signature every outcome is success; processing errors are logged.
    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> AppResult<WebhookOutcome> {
        self.require_online_payments()?;
        let signature =
            signature.ok_or_else(|| AppError::signature_invalid("Missing Stripe-Signature header"))?;
        let event = webhook::construct_event(
            payload,
            signature,
            &self.config.webhook_secret,
            self.config.webhook_tolerance_seconds,
            Utc::now().timestamp(),
        )?;

        if event.event_type != CHECKOUT_SESSION_COMPLETED {
            info!(event_id = %event.id, event_type = %event.event_type, "Ignoring webhook event");
            return Ok(WebhookOutcome::Ignored);
        }

        match self.complete_session(event.data.object).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(event_id = %event.id, error = %e, "Failed to process checkout completion");
                Ok(WebhookOutcome::Failed)
            }
        }
    }

    async fn complete_session(&self, object: serde_json::Value) -> AppResult<WebhookOutcome> {
        let session: CheckoutSession = serde_json::from_value(object)?;
        let intent_id = session
            .payment_intent
            .clone()
            .ok_or_else(|| AppError::validation("Completed session has no payment intent"))?;

        if let Some(existing) = self.orders.find_by_payment_intent(&intent_id).await? {
            info!(payment_intent_id = %intent_id, order_id = %existing.id, "Webhook replay ignored");
            return Ok(WebhookOutcome::Duplicate(existing.id));
        }

        let meta = CheckoutMetadata::from_map(&session.metadata)?;
        let placed = self
            .insert_once(NewOrder {
                user_id: meta.user_id,
                items: meta.items,
                delivery_fee: meta.delivery_fee,
                total_price: meta.total_price,
                payment_method: PaymentMethod::Online,
                payment_status: PaymentStatus::Done,
                payment_intent_id: Some(intent_id.clone()),
            })
            .await?;

        if !placed.created {
            return Ok(WebhookOutcome::Duplicate(placed.order.id));
        }

        if let Err(e) = self.cart.clear(meta.user_id).await {
            error!(user_id = %meta.user_id, error = %e, "Failed to clear cart after payment");
        }
        self.notifications.notify_order_placed(&placed.order).await;

        info!(
            order_id = %placed.order.id,
            payment_intent_id = %intent_id,
            session_id = %session.id,
            "Order created from checkout webhook"
        );
        Ok(WebhookOutcome::Created(placed.order.id))
    }
}
