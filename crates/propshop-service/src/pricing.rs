//! Authoritative server-side pricing.
//!
//! Prices are always computed from freshly read catalog rows; nothing here
//! trusts client-supplied amounts.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use propshop_core::error::AppError;
use propshop_core::result::AppResult;
use propshop_database::store::CatalogStore;
use propshop_entity::order::{FulfillmentType, OrderLine};
use propshop_entity::prop::Prop;

/// Days in one rental pricing unit.
const RENTAL_UNIT_DAYS: i64 = 7;

/// Unit price for a prop under the given fulfilment type.
///
/// Purchases cost `purchase_price` and ignore `rental_days`. Rentals cost
/// `rental_price * rental_days / 7`, unrounded.
pub fn unit_price(
    prop: &Prop,
    fulfillment_type: FulfillmentType,
    rental_days: Option<i32>,
) -> AppResult<Decimal> {
    match fulfillment_type {
        FulfillmentType::Purchase => Ok(prop.purchase_price),
        FulfillmentType::Rental => match rental_days {
            Some(days) if days > 0 => {
                Ok(prop.rental_price * Decimal::from(days) / Decimal::from(RENTAL_UNIT_DAYS))
            }
            _ => Err(AppError::validation(format!(
                "Rental days must be a positive number for rental item \"{}\"",
                prop.name
            ))),
        },
    }
}

/// Unit price times quantity. Quantity must be at least 1.
pub fn line_total(unit_price: Decimal, quantity: i32) -> AppResult<Decimal> {
    if quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    Ok(unit_price * Decimal::from(quantity))
}

/// Round to two decimals, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One priced line together with the prop it was priced from.
#[derive(Debug, Clone)]
pub struct PricedLine {
    /// The submitted line.
    pub line: OrderLine,
    /// The catalog row used for pricing.
    pub prop: Prop,
    /// Authoritative unit price.
    pub unit_price: Decimal,
    /// `unit_price * quantity`.
    pub total: Decimal,
}

/// A fully priced submission.
#[derive(Debug, Clone)]
pub struct PricedCart {
    /// Lines in submission order.
    pub lines: Vec<PricedLine>,
    /// Sum of line totals.
    pub subtotal: Decimal,
}

impl PricedCart {
    /// Check a client-claimed total against `subtotal + delivery_fee`.
    ///
    /// Both sides are rounded to two decimals before comparing.
    pub fn verify_total(&self, delivery_fee: Decimal, claimed: Decimal) -> AppResult<Decimal> {
        let expected = round2(self.subtotal + delivery_fee);
        if expected != round2(claimed) {
            return Err(AppError::total_mismatch(format!(
                "Total mismatch: expected {expected}, received {}",
                round2(claimed)
            )));
        }
        Ok(expected)
    }

    /// Name of the first line's prop.
    pub fn first_name(&self) -> Option<&str> {
        self.lines.first().map(|l| l.prop.name.as_str())
    }
}

/// Price every line against the catalog.
///
/// Fails on the first missing prop or invalid line; nothing is partially
/// priced.
pub async fn price_lines(catalog: &dyn CatalogStore, lines: &[OrderLine]) -> AppResult<PricedCart> {
    if lines.is_empty() {
        return Err(AppError::validation("Order must contain at least one item"));
    }

    let ids: Vec<Uuid> = lines.iter().map(|l| l.prop_id).collect();
    let props: HashMap<Uuid, Prop> = catalog
        .find_props(&ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let mut priced = Vec::with_capacity(lines.len());
    let mut subtotal = Decimal::ZERO;
    for line in lines {
        let prop = props
            .get(&line.prop_id)
            .ok_or_else(|| AppError::not_found(format!("Prop not found: {}", line.prop_id)))?;
        let unit = unit_price(prop, line.fulfillment_type, line.rental_days)?;
        let total = line_total(unit, line.quantity)?;
        subtotal += total;
        priced.push(PricedLine {
            line: line.clone(),
            prop: prop.clone(),
            unit_price: unit,
            total,
        });
    }

    Ok(PricedCart {
        lines: priced,
        subtotal,
    })
}
