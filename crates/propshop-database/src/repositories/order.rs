//! Order repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use propshop_core::error::{AppError, ErrorKind};
use propshop_core::result::AppResult;
use propshop_entity::order::{NewOrder, Order, OrderStatus, PaymentStatus};

use crate::store::OrderStore;

/// Repository for the order ledger.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn insert(&self, order: NewOrder) -> AppResult<Order> {
        let inserted = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (user_id, items, delivery_fee, total_price, payment_method, \
             payment_status, payment_intent_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (payment_intent_id) DO NOTHING RETURNING *",
        )
        .bind(order.user_id)
        .bind(Json(&order.items))
        .bind(order.delivery_fee)
        .bind(order.total_price)
        .bind(order.payment_method)
        .bind(order.payment_status)
        .bind(&order.payment_intent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create order", e))?;

        inserted.ok_or_else(|| {
            AppError::conflict(format!(
                "An order already exists for payment intent {}",
                order.payment_intent_id.as_deref().unwrap_or_default()
            ))
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find order", e))
    }

    async fn find_by_payment_intent(&self, payment_intent_id: &str) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE payment_intent_id = $1")
            .bind(payment_intent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to find order by payment intent",
                    e,
                )
            })
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Order>> {
        sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY order_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user orders", e))
    }

    async fn list_all(&self) -> AppResult<Vec<Order>> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY order_date DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list orders", e))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: Option<OrderStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>(
            "UPDATE orders SET status = COALESCE($2, status), \
             payment_status = COALESCE($3, payment_status) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(payment_status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update order", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete order", e))?;
        Ok(result.rows_affected() > 0)
    }
}
