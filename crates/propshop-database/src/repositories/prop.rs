//! Prop repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use propshop_core::error::{AppError, ErrorKind};
use propshop_core::result::AppResult;
use propshop_core::types::pagination::{PageRequest, PageResponse};
use propshop_entity::prop::{CreateProp, Prop, UpdateProp};

use crate::store::CatalogStore;

/// Repository for the prop catalog.
#[derive(Debug, Clone)]
pub struct PropRepository {
    pool: PgPool,
}

impl PropRepository {
    /// Create a new prop repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PropRepository {
    async fn find_prop(&self, id: Uuid) -> AppResult<Option<Prop>> {
        sqlx::query_as::<_, Prop>("SELECT * FROM props WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find prop", e))
    }

    async fn find_props(&self, ids: &[Uuid]) -> AppResult<Vec<Prop>> {
        sqlx::query_as::<_, Prop>("SELECT * FROM props WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find props", e))
    }

    async fn list_props(&self, page: &PageRequest) -> AppResult<PageResponse<Prop>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM props")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count props", e))?;

        let props = sqlx::query_as::<_, Prop>(
            "SELECT * FROM props ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list props", e))?;

        Ok(PageResponse::new(props, *page, total as u64))
    }

    async fn create_prop(&self, data: CreateProp) -> AppResult<Prop> {
        sqlx::query_as::<_, Prop>(
            "INSERT INTO props (name, image, description, categories, purchase_price, rental_price, \
             available_stock, has_discount, discount_type, discount_percent, discount_start, discount_end) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.image)
        .bind(&data.description)
        .bind(&data.categories)
        .bind(data.purchase_price)
        .bind(data.rental_price)
        .bind(data.available_stock)
        .bind(data.has_discount)
        .bind(&data.discount_type)
        .bind(data.discount_percent)
        .bind(data.discount_start)
        .bind(data.discount_end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create prop", e))
    }

    async fn update_prop(&self, id: Uuid, update: &UpdateProp) -> AppResult<Option<Prop>> {
        sqlx::query_as::<_, Prop>(
            "UPDATE props SET \
             name = COALESCE($2, name), \
             image = COALESCE($3, image), \
             description = COALESCE($4, description), \
             categories = COALESCE($5, categories), \
             purchase_price = COALESCE($6, purchase_price), \
             rental_price = COALESCE($7, rental_price), \
             available_stock = COALESCE($8, available_stock), \
             has_discount = COALESCE($9, has_discount), \
             discount_type = COALESCE($10, discount_type), \
             discount_percent = COALESCE($11, discount_percent), \
             discount_start = COALESCE($12, discount_start), \
             discount_end = COALESCE($13, discount_end), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.image)
        .bind(&update.description)
        .bind(&update.categories)
        .bind(update.purchase_price)
        .bind(update.rental_price)
        .bind(update.available_stock)
        .bind(update.has_discount)
        .bind(&update.discount_type)
        .bind(update.discount_percent)
        .bind(update.discount_start)
        .bind(update.discount_end)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update prop", e))
    }

    async fn delete_prop(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM props WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete prop", e))?;
        Ok(result.rows_affected() > 0)
    }
}
