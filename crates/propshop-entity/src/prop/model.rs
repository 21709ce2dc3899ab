//! Prop entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::PropCategory;

/// A rentable/purchasable catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Prop {
    /// Unique prop identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Stored image reference.
    pub image: String,
    /// Long description.
    pub description: String,
    /// Category tags.
    pub categories: Vec<PropCategory>,
    /// One-time sale price.
    pub purchase_price: Decimal,
    /// Rental price per 7-day unit.
    pub rental_price: Decimal,
    /// Units on hand.
    pub available_stock: i32,
    /// Derived from stock; never written directly.
    pub is_available: bool,
    /// Whether a discount window is configured.
    pub has_discount: bool,
    /// Discount kind, e.g. `percentage` or `flat`.
    pub discount_type: Option<String>,
    /// Discount percentage.
    pub discount_percent: Option<Decimal>,
    /// Discount window start.
    pub discount_start: Option<DateTime<Utc>>,
    /// Discount window end.
    pub discount_end: Option<DateTime<Utc>>,
    /// When the prop was created.
    pub created_at: DateTime<Utc>,
    /// When the prop was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Prop {
    /// Availability as a function of stock.
    pub fn availability_for(stock: i32) -> bool {
        stock > 0
    }

    /// Whether a discount window covers `at`.
    pub fn discount_active_at(&self, at: DateTime<Utc>) -> bool {
        if !self.has_discount {
            return false;
        }
        let started = self.discount_start.is_none_or(|start| start <= at);
        let not_ended = self.discount_end.is_none_or(|end| at <= end);
        started && not_ended
    }
}

/// Data required to create a prop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProp {
    /// Display name.
    pub name: String,
    /// Stored image reference.
    pub image: String,
    /// Long description.
    pub description: String,
    /// Category tags.
    pub categories: Vec<PropCategory>,
    /// One-time sale price.
    pub purchase_price: Decimal,
    /// Rental price per 7-day unit.
    pub rental_price: Decimal,
    /// Units on hand.
    pub available_stock: i32,
    /// Whether a discount window is configured.
    #[serde(default)]
    pub has_discount: bool,
    /// Discount kind.
    pub discount_type: Option<String>,
    /// Discount percentage.
    pub discount_percent: Option<Decimal>,
    /// Discount window start.
    pub discount_start: Option<DateTime<Utc>>,
    /// Discount window end.
    pub discount_end: Option<DateTime<Utc>>,
}

impl CreateProp {
    /// Materialize as a stored prop with availability derived from stock.
    pub fn into_prop(self) -> Prop {
        let now = Utc::now();
        Prop {
            id: Uuid::new_v4(),
            name: self.name,
            image: self.image,
            description: self.description,
            categories: self.categories,
            purchase_price: self.purchase_price,
            rental_price: self.rental_price,
            available_stock: self.available_stock,
            is_available: Prop::availability_for(self.available_stock),
            has_discount: self.has_discount,
            discount_type: self.discount_type,
            discount_percent: self.discount_percent,
            discount_start: self.discount_start,
            discount_end: self.discount_end,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a prop. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProp {
    /// Display name.
    pub name: Option<String>,
    /// Stored image reference.
    pub image: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Category tags.
    pub categories: Option<Vec<PropCategory>>,
    /// One-time sale price.
    pub purchase_price: Option<Decimal>,
    /// Rental price per 7-day unit.
    pub rental_price: Option<Decimal>,
    /// Units on hand.
    pub available_stock: Option<i32>,
    /// Whether a discount window is configured.
    pub has_discount: Option<bool>,
    /// Discount kind.
    pub discount_type: Option<String>,
    /// Discount percentage.
    pub discount_percent: Option<Decimal>,
    /// Discount window start.
    pub discount_start: Option<DateTime<Utc>>,
    /// Discount window end.
    pub discount_end: Option<DateTime<Utc>>,
}

impl UpdateProp {
    /// Apply this update to an existing prop, recomputing availability.
    pub fn apply_to(&self, prop: &mut Prop) {
        if let Some(name) = &self.name {
            prop.name = name.clone();
        }
        if let Some(image) = &self.image {
            prop.image = image.clone();
        }
        if let Some(description) = &self.description {
            prop.description = description.clone();
        }
        if let Some(categories) = &self.categories {
            prop.categories = categories.clone();
        }
        if let Some(price) = self.purchase_price {
            prop.purchase_price = price;
        }
        if let Some(price) = self.rental_price {
            prop.rental_price = price;
        }
        if let Some(stock) = self.available_stock {
            prop.available_stock = stock;
        }
        if let Some(has_discount) = self.has_discount {
            prop.has_discount = has_discount;
        }
        if self.discount_type.is_some() {
            prop.discount_type = self.discount_type.clone();
        }
        if self.discount_percent.is_some() {
            prop.discount_percent = self.discount_percent;
        }
        if self.discount_start.is_some() {
            prop.discount_start = self.discount_start;
        }
        if self.discount_end.is_some() {
            prop.discount_end = self.discount_end;
        }
        prop.is_available = Prop::availability_for(prop.available_stock);
        prop.updated_at = Utc::now();
    }
}
