//! Payment provider webhook.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use bytes::Bytes;
use tracing::debug;

use crate::dto::response::{ApiResponse, WebhookAck};
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the provider's payload signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// POST /api/payments/webhook
///
/// The body is taken raw so the signature is checked over the exact bytes
/// the provider sent.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<WebhookAck>>, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let outcome = state
        .checkout_service
        .handle_webhook(&body, signature)
        .await?;
    debug!(?outcome, "Webhook processed");

    Ok(Json(ApiResponse::ok(WebhookAck { received: true })))
}
