//! Notification handlers.

use axum::Json;
use axum::extract::State;

use propshop_entity::notification::Notification;
use propshop_service::notification::{AdminNotificationView, NotificationView};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath};
use crate::state::AppState;

/// GET /api/notifications/user/{user_id}
pub async fn list_user_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> Result<Json<ApiResponse<Vec<NotificationView>>>, ApiError> {
    let notifications = state
        .notification_service
        .list_for_user(&auth, user_id)
        .await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// PATCH /api/notifications/{id}
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let notification = state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// PATCH /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let count = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "marked": count }))))
}

/// GET /api/notifications/all
pub async fn list_admin_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<AdminNotificationView>>>, ApiError> {
    let notifications = state.notification_service.list_for_admins(&auth).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}
