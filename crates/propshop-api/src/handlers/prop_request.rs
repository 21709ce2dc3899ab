//! Prop request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use propshop_entity::prop_request::PropRequest;
use propshop_service::prop_request::PropRequestView;

use crate::dto::request::{SubmitPropRequestBody, UpdatePropRequestBody};
use crate::dto::response::{ApiResponse, CountResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath};
use crate::state::AppState;

/// POST /api/prop-requests
pub async fn submit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SubmitPropRequestBody>,
) -> Result<(StatusCode, Json<ApiResponse<PropRequest>>), ApiError> {
    validate_body(&req)?;
    let request = state.prop_request_service.submit(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// GET /api/prop-requests/pending/count
pub async fn pending_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.prop_request_service.pending_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// GET /api/prop-requests/all
pub async fn list_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<PropRequestView>>>, ApiError> {
    let requests = state.prop_request_service.list_all(&auth).await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// PUT /api/prop-requests/{id}
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    Json(req): Json<UpdatePropRequestBody>,
) -> Result<Json<ApiResponse<PropRequest>>, ApiError> {
    let request = state
        .prop_request_service
        .update_status(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(request)))
}
