//! Order handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use propshop_entity::order::Order;
use propshop_service::order::{OrderCounts, PaymentIntentCheck, RentedProps};

use crate::dto::request::{PlaceOrderBody, UpdateOrderStatusBody};
use crate::dto::response::{ApiResponse, MessageResponse, OrderPlacedResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath};
use crate::state::AppState;

/// POST /api/orders
///
/// 201 for a new order; 200 when the payment intent already had one.
pub async fn place_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<PlaceOrderBody>,
) -> Result<(StatusCode, Json<ApiResponse<OrderPlacedResponse>>), ApiError> {
    validate_body(&req)?;
    let placed = state.checkout_service.place_order(&auth, req.into()).await?;

    let (status, message) = if placed.created {
        (StatusCode::CREATED, "Order placed successfully")
    } else {
        (StatusCode::OK, "Order already exists for this payment")
    };
    Ok((
        status,
        Json(ApiResponse::ok(OrderPlacedResponse {
            message: message.to_string(),
            order: placed.order,
        })),
    ))
}

/// GET /api/orders/user/{user_id}
pub async fn list_user_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> Result<Json<ApiResponse<Vec<Order>>>, ApiError> {
    let orders = state.order_service.list_for_user(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(orders)))
}

/// GET /api/orders
pub async fn list_all_orders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Order>>>, ApiError> {
    let orders = state.order_service.list_all(&auth).await?;
    Ok(Json(ApiResponse::ok(orders)))
}

/// PATCH /api/orders/status/{id}
pub async fn update_order_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    Json(req): Json<UpdateOrderStatusBody>,
) -> Result<Json<ApiResponse<Order>>, ApiError> {
    let order = state
        .order_service
        .update_status(&auth, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(order)))
}

/// DELETE /api/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.order_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Order deleted successfully",
    ))))
}

/// GET /api/orders/check/{payment_intent_id}
pub async fn check_payment_intent(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(payment_intent_id): Path<String>,
) -> Result<Json<ApiResponse<PaymentIntentCheck>>, ApiError> {
    let check = state
        .order_service
        .check_payment_intent(&auth, &payment_intent_id)
        .await?;
    Ok(Json(ApiResponse::ok(check)))
}

/// GET /api/orders/counts/{user_id}
pub async fn order_counts(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> Result<Json<ApiResponse<OrderCounts>>, ApiError> {
    let counts = state.order_service.counts(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(counts)))
}

/// GET /api/orders/currently-rented/{user_id}
pub async fn currently_rented(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> Result<Json<ApiResponse<RentedProps>>, ApiError> {
    let rented = state.order_service.currently_rented(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(rented)))
}
