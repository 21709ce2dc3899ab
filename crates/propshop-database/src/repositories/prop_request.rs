//! Prop request repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use propshop_core::error::{AppError, ErrorKind};
use propshop_core::result::AppResult;
use propshop_entity::prop_request::{CreatePropRequest, PropRequest, RequestStatus};

use crate::store::PropRequestStore;

/// Repository for prop requests.
#[derive(Debug, Clone)]
pub struct PropRequestRepository {
    pool: PgPool,
}

impl PropRequestRepository {
    /// Create a new prop request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropRequestStore for PropRequestRepository {
    async fn create(&self, data: CreatePropRequest) -> AppResult<PropRequest> {
        sqlx::query_as::<_, PropRequest>(
            "INSERT INTO prop_requests (user_id, prop_name, description, urgency, reason, additional_info) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.prop_name)
        .bind(&data.description)
        .bind(data.urgency)
        .bind(data.reason)
        .bind(&data.additional_info)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create prop request", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PropRequest>> {
        sqlx::query_as::<_, PropRequest>("SELECT * FROM prop_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find prop request", e)
            })
    }

    async fn list_all(&self) -> AppResult<Vec<PropRequest>> {
        sqlx::query_as::<_, PropRequest>("SELECT * FROM prop_requests ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list prop requests", e)
            })
    }

    async fn count_by_status(&self, status: RequestStatus) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM prop_requests WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count prop requests", e)
            })
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> AppResult<Option<PropRequest>> {
        sqlx::query_as::<_, PropRequest>(
            "UPDATE prop_requests SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update prop request", e)
        })
    }
}
