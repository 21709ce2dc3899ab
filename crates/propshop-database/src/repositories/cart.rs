//! Cart repository implementation.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use propshop_core::error::{AppError, ErrorKind};
use propshop_core::result::AppResult;
use propshop_entity::cart::{CartLine, NewCartLine};

use crate::store::CartStore;

/// Upsert result carrying whether the row was freshly inserted.
#[derive(FromRow)]
struct UpsertedLine {
    #[sqlx(flatten)]
    line: CartLine,
    inserted: bool,
}

/// Repository for cart lines.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    /// Create a new cart repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for CartRepository {
    async fn add_or_merge(&self, line: NewCartLine) -> AppResult<(CartLine, bool)> {
        // xmax is zero only for rows created by this statement.
        let row = sqlx::query_as::<_, UpsertedLine>(
            "INSERT INTO cart_items (user_id, prop_id, quantity, fulfillment_type, rental_days) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, prop_id) DO UPDATE SET \
             quantity = cart_items.quantity + EXCLUDED.quantity, \
             fulfillment_type = EXCLUDED.fulfillment_type, \
             rental_days = EXCLUDED.rental_days \
             RETURNING *, (xmax = 0) AS inserted",
        )
        .bind(line.user_id)
        .bind(line.prop_id)
        .bind(line.quantity)
        .bind(line.fulfillment_type)
        .bind(line.rental_days)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add cart line", e))?;

        Ok((row.line, row.inserted))
    }

    async fn find_line(&self, id: Uuid) -> AppResult<Option<CartLine>> {
        sqlx::query_as::<_, CartLine>("SELECT * FROM cart_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find cart line", e))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<CartLine>> {
        sqlx::query_as::<_, CartLine>(
            "SELECT * FROM cart_items WHERE user_id = $1 ORDER BY added_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cart", e))
    }

    async fn save_line(&self, line: &CartLine) -> AppResult<CartLine> {
        sqlx::query_as::<_, CartLine>(
            "UPDATE cart_items SET quantity = $2, fulfillment_type = $3, rental_days = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(line.id)
        .bind(line.quantity)
        .bind(line.fulfillment_type)
        .bind(line.rental_days)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update cart line", e))?
        .ok_or_else(|| AppError::not_found("Cart item not found"))
    }

    async fn remove_line(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove cart line", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear cart", e))?;
        Ok(result.rows_affected())
    }
}
