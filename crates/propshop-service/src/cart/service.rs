//! Cart add/merge, enriched view, update, and removal.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use propshop_core::error::AppError;
use propshop_core::result::AppResult;
use propshop_database::store::{CartStore, CatalogStore};
use propshop_entity::cart::{CartLine, NewCartLine};
use propshop_entity::order::FulfillmentType;
use propshop_entity::prop::Prop;

use crate::context::RequestContext;
use crate::pricing;

/// Request to add a prop to a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCart {
    /// Cart owner.
    pub user_id: Uuid,
    /// Prop to add.
    pub prop_id: Uuid,
    /// Quantity to add (defaults to 1).
    pub quantity: Option<i32>,
    /// Purchase or rental.
    pub fulfillment_type: FulfillmentType,
    /// Rental duration; required for rentals.
    pub rental_days: Option<i32>,
}

/// Partial update of a cart line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCartLine {
    /// New quantity; 0 removes the line.
    pub quantity: Option<i32>,
    /// New fulfilment type.
    pub fulfillment_type: Option<FulfillmentType>,
    /// New rental duration.
    pub rental_days: Option<i32>,
}

/// A cart line with prices computed from the current catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    /// Line id.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Prop id.
    pub prop_id: Uuid,
    /// Prop name.
    pub name: String,
    /// Prop image.
    pub image: String,
    /// Quantity.
    pub quantity: i32,
    /// Purchase or rental.
    #[serde(rename = "type")]
    pub fulfillment_type: FulfillmentType,
    /// Rental duration.
    pub rental_days: Option<i32>,
    /// Catalog purchase price.
    pub purchase_price: Decimal,
    /// Catalog rental price per 7 days.
    pub rental_price: Decimal,
    /// Unit price under the line's type.
    pub base_price: Decimal,
    /// `base_price * quantity`.
    pub total_price: Decimal,
    /// When the line was added.
    pub added_at: DateTime<Utc>,
}

impl CartLineView {
    fn build(line: CartLine, prop: &Prop) -> AppResult<Self> {
        let base_price = pricing::unit_price(prop, line.fulfillment_type, line.rental_days)?;
        Ok(Self {
            total_price: base_price * Decimal::from(line.quantity),
            id: line.id,
            user_id: line.user_id,
            prop_id: line.prop_id,
            name: prop.name.clone(),
            image: prop.image.clone(),
            quantity: line.quantity,
            fulfillment_type: line.fulfillment_type,
            rental_days: line.rental_days,
            purchase_price: prop.purchase_price,
            rental_price: prop.rental_price,
            base_price,
            added_at: line.added_at,
        })
    }
}

/// Manages per-user carts.
#[derive(Debug, Clone)]
pub struct CartService {
    cart: Arc<dyn CartStore>,
    catalog: Arc<dyn CatalogStore>,
}

/// Rental days kept on a line: only for rentals, only when positive.
fn rental_days_for(fulfillment_type: FulfillmentType, days: Option<i32>) -> AppResult<Option<i32>> {
    match fulfillment_type {
        FulfillmentType::Purchase => Ok(None),
        FulfillmentType::Rental => match days {
            Some(d) if d >= 1 => Ok(Some(d)),
            _ => Err(AppError::validation(
                "Rental days must be at least 1 for rental items",
            )),
        },
    }
}

impl CartService {
    /// Creates a new cart service.
    pub fn new(cart: Arc<dyn CartStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { cart, catalog }
    }

    /// Adds a prop or merges into the existing line for it.
    ///
    /// Returns the enriched line and whether it was newly created.
    pub async fn add(
        &self,
        ctx: &RequestContext,
        req: AddToCart,
    ) -> AppResult<(CartLineView, bool)> {
        ctx.require_self_or_admin(req.user_id)?;

        let quantity = req.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }
        let rental_days = rental_days_for(req.fulfillment_type, req.rental_days)?;

        let prop = self
            .catalog
            .find_prop(req.prop_id)
            .await?
            .ok_or_else(|| AppError::not_found("Prop not found"))?;

        let (line, created) = self
            .cart
            .add_or_merge(NewCartLine {
                user_id: req.user_id,
                prop_id: req.prop_id,
                quantity,
                fulfillment_type: req.fulfillment_type,
                rental_days,
            })
            .await?;

        info!(
            user_id = %line.user_id,
            prop_id = %line.prop_id,
            quantity = line.quantity,
            created,
            "Cart line saved"
        );
        Ok((CartLineView::build(line, &prop)?, created))
    }

    /// Lines of a user's cart, newest first, with current prices.
    ///
    /// Lines whose prop was deleted are skipped. An empty cart is
    /// `NotFound`.
    pub async fn view(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<Vec<CartLineView>> {
        ctx.require_self_or_admin(user_id)?;

        let lines = self.cart.list_for_user(user_id).await?;
        if lines.is_empty() {
            return Err(AppError::not_found("Cart is empty"));
        }

        let ids: Vec<Uuid> = lines.iter().map(|l| l.prop_id).collect();
        let props: HashMap<Uuid, Prop> = self
            .catalog
            .find_props(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        lines
            .into_iter()
            .filter_map(|line| props.get(&line.prop_id).map(|p| CartLineView::build(line, p)))
            .collect()
    }

    async fn owned_line(&self, ctx: &RequestContext, id: Uuid) -> AppResult<CartLine> {
        let line = self
            .cart
            .find_line(id)
            .await?
            .ok_or_else(|| AppError::not_found("Cart item not found"))?;
        ctx.require_self_or_admin(line.user_id)?;
        Ok(line)
    }

    /// Updates a line. Quantity 0 removes it and returns `None`.
    ///
    /// Changing the type resets rental days unless the new type is rental
    /// and days were supplied.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateCartLine,
    ) -> AppResult<Option<CartLineView>> {
        let mut line = self.owned_line(ctx, id).await?;

        if let Some(quantity) = req.quantity {
            if quantity < 0 {
                return Err(AppError::validation("Quantity cannot be negative"));
            }
            if quantity == 0 {
                self.cart.remove_line(id).await?;
                info!(line_id = %id, "Cart line removed by zero quantity");
                return Ok(None);
            }
            line.quantity = quantity;
        }

        match req.fulfillment_type {
            Some(new_type) if new_type != line.fulfillment_type => {
                line.fulfillment_type = new_type;
                line.rental_days = rental_days_for(new_type, req.rental_days)?;
            }
            _ => {
                if let Some(days) = req.rental_days {
                    if line.fulfillment_type == FulfillmentType::Rental {
                        line.rental_days = rental_days_for(FulfillmentType::Rental, Some(days))?;
                    }
                }
            }
        }

        let prop = self
            .catalog
            .find_prop(line.prop_id)
            .await?
            .ok_or_else(|| AppError::not_found("Prop not found"))?;
        let saved = self.cart.save_line(&line).await?;
        Ok(Some(CartLineView::build(saved, &prop)?))
    }

    /// Removes a line.
    pub async fn remove(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.owned_line(ctx, id).await?;
        if !self.cart.remove_line(id).await? {
            return Err(AppError::not_found("Cart item not found"));
        }
        Ok(())
    }

    /// Removes every line of a user's cart.
    pub async fn clear(&self, ctx: &RequestContext, user_id: Uuid) -> AppResult<u64> {
        ctx.require_self_or_admin(user_id)?;
        let removed = self.cart.clear(user_id).await?;
        info!(user_id = %user_id, removed, "Cart cleared");
        Ok(removed)
    }
}
