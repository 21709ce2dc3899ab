//! Hosted checkout session handlers.

use axum::Json;
use axum::extract::{Path, State};

use propshop_service::checkout::{CheckoutSessionCreated, CheckoutSessionSummary};

use crate::dto::request::CheckoutSessionBody;
use crate::dto::response::ApiResponse;
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/checkout-session
pub async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CheckoutSessionBody>,
) -> Result<Json<ApiResponse<CheckoutSessionCreated>>, ApiError> {
    validate_body(&req)?;
    let session = state
        .checkout_service
        .create_checkout_session(&auth, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(session)))
}

/// GET /api/checkout-session/{id}
pub async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<CheckoutSessionSummary>>, ApiError> {
    let summary = state
        .checkout_service
        .retrieve_checkout_session(&auth, &session_id)
        .await?;
    Ok(Json(ApiResponse::ok(summary)))
}
