//! Catalog handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use propshop_core::types::PageResponse;
use propshop_entity::prop::Prop;

use crate::dto::request::{CreatePropBody, UpdatePropBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath, PaginationParams};
use crate::state::AppState;

/// GET /api/props
pub async fn list_props(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Prop>>>, ApiError> {
    let page = state
        .catalog_service
        .list(&params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/props/{id}
pub async fn get_prop(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<Prop>>, ApiError> {
    let prop = state.catalog_service.get(id).await?;
    Ok(Json(ApiResponse::ok(prop)))
}

/// POST /api/props
pub async fn create_prop(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreatePropBody>,
) -> Result<(StatusCode, Json<ApiResponse<Prop>>), ApiError> {
    validate_body(&req)?;
    let prop = state.catalog_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(prop))))
}

/// PATCH /api/props/{id}
pub async fn update_prop(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    Json(req): Json<UpdatePropBody>,
) -> Result<Json<ApiResponse<Prop>>, ApiError> {
    validate_body(&req)?;
    let prop = state.catalog_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(prop)))
}

/// DELETE /api/props/{id}
pub async fn delete_prop(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.catalog_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Prop deleted"))))
}
