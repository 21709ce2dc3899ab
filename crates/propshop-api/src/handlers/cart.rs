//! Cart handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use propshop_service::cart::CartLineView;

use crate::dto::request::{AddToCartBody, UpdateCartLineBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath};
use crate::state::AppState;

/// POST /api/cart/add
///
/// 201 when a new line was created, 200 when merged into an existing one.
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddToCartBody>,
) -> Result<(StatusCode, Json<ApiResponse<CartLineView>>), ApiError> {
    validate_body(&req)?;
    let (line, created) = state.cart_service.add(&auth, req.into()).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(ApiResponse::ok(line))))
}

/// GET /api/cart/{user_id}
pub async fn get_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> Result<Json<ApiResponse<Vec<CartLineView>>>, ApiError> {
    let lines = state.cart_service.view(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(lines)))
}

/// PATCH /api/cart/update/{id}
///
/// Returns `null` data when the update removed the line.
pub async fn update_cart_line(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    Json(req): Json<UpdateCartLineBody>,
) -> Result<Json<ApiResponse<Option<CartLineView>>>, ApiError> {
    validate_body(&req)?;
    let line = state.cart_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(line)))
}

/// DELETE /api/cart/remove/{id}
pub async fn remove_cart_line(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.cart_service.remove(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Item removed from cart",
    ))))
}

/// DELETE /api/cart/clear/{user_id}
pub async fn clear_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let removed = state.cart_service.clear(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "removed": removed }))))
}
