//! Public catalog reads and admin maintenance.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use propshop_core::error::AppError;
use propshop_core::result::AppResult;
use propshop_core::types::{PageRequest, PageResponse};
use propshop_database::store::CatalogStore;
use propshop_entity::prop::{CreateProp, Prop, PropCategory, UpdateProp};

use crate::context::RequestContext;

/// Prop catalog operations.
#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
}

fn check_price(label: &str, price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::validation(format!("{label} cannot be negative")));
    }
    Ok(())
}

fn check_stock(stock: i32) -> AppResult<()> {
    if stock < 0 {
        return Err(AppError::validation("Available stock cannot be negative"));
    }
    Ok(())
}

fn check_categories(categories: &[PropCategory]) -> AppResult<()> {
    if categories.is_empty() {
        return Err(AppError::validation("At least one category is required"));
    }
    Ok(())
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    /// One page of props, newest first.
    pub async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Prop>> {
        self.catalog.list_props(page).await
    }

    /// A single prop.
    pub async fn get(&self, id: Uuid) -> AppResult<Prop> {
        self.catalog
            .find_prop(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Prop {id} not found")))
    }

    /// Adds a prop. Availability follows stock.
    pub async fn create(&self, ctx: &RequestContext, data: CreateProp) -> AppResult<Prop> {
        ctx.require_admin()?;
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Prop name is required"));
        }
        check_categories(&data.categories)?;
        check_price("Purchase price", data.purchase_price)?;
        check_price("Rental price", data.rental_price)?;
        check_stock(data.available_stock)?;

        let prop = self.catalog.create_prop(data).await?;
        info!(prop_id = %prop.id, name = %prop.name, admin = %ctx.username, "Prop created");
        Ok(prop)
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        update: UpdateProp,
    ) -> AppResult<Prop> {
        ctx.require_admin()?;
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Prop name cannot be empty"));
        }
        if let Some(categories) = &update.categories {
            check_categories(categories)?;
        }
        if let Some(price) = update.purchase_price {
            check_price("Purchase price", price)?;
        }
        if let Some(price) = update.rental_price {
            check_price("Rental price", price)?;
        }
        if let Some(stock) = update.available_stock {
            check_stock(stock)?;
        }

        let prop = self
            .catalog
            .update_prop(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Prop {id} not found")))?;
        info!(prop_id = %id, admin = %ctx.username, "Prop updated");
        Ok(prop)
    }

    /// Removes a prop.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;
        if !self.catalog.delete_prop(id).await? {
            return Err(AppError::not_found(format!("Prop {id} not found")));
        }
        info!(prop_id = %id, admin = %ctx.username, "Prop deleted");
        Ok(())
    }
}
