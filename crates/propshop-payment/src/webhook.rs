//! Webhook signature verification and event parsing.
//!
//! The `Stripe-Signature` header carries `t=<unix seconds>` and one or more
//! `v1=<hex>` entries. Each `v1` is HMAC-SHA256 of `"{t}.{raw body}"` keyed
//! with the endpoint's signing secret.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::warn;

use propshop_core::error::AppError;
use propshop_core::result::AppResult;

type HmacSha256 = Hmac<Sha256>;

/// Event type emitted when a hosted checkout completes.
pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// A verified provider event.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Provider event id.
    pub id: String,
    /// Event type, e.g. `checkout.session.completed`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload.
    pub data: WebhookEventData,
}

/// Payload wrapper of a provider event.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    /// The object the event is about (a checkout session for completions).
    pub object: serde_json::Value,
}

/// Verify the signature header against the raw body.
///
/// `now` is the current unix time in seconds; timestamps further than
/// `tolerance_seconds` from it are rejected.
pub fn verify_signature(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
    tolerance_seconds: i64,
    now: i64,
) -> AppResult<()> {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in sig_header.split(',') {
        let part = part.trim();
        if let Some(t) = part.strip_prefix("t=") {
            timestamp = Some(t);
        } else if let Some(v) = part.strip_prefix("v1=") {
            signatures.push(v);
        }
    }

    let Some(timestamp) = timestamp else {
        return Err(AppError::signature_invalid("Invalid Stripe-Signature header"));
    };
    if signatures.is_empty() {
        return Err(AppError::signature_invalid("Invalid Stripe-Signature header"));
    }

    let ts: i64 = timestamp
        .parse()
        .map_err(|_| AppError::signature_invalid("Invalid signature timestamp"))?;
    if now.abs_diff(ts) > tolerance_seconds.unsigned_abs() {
        return Err(AppError::signature_invalid(
            "Webhook timestamp outside tolerance",
        ));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::configuration("Invalid webhook secret"))?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);

    let matched = signatures.iter().any(|sig| {
        hex::decode(sig)
            .map(|bytes| mac.clone().verify_slice(&bytes).is_ok())
            .unwrap_or(false)
    });

    if !matched {
        warn!("Webhook signature mismatch");
        return Err(AppError::signature_invalid("Webhook signature mismatch"));
    }
    Ok(())
}

/// Verify the signature and parse the event.
pub fn construct_event(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
    tolerance_seconds: i64,
    now: i64,
) -> AppResult<WebhookEvent> {
    verify_signature(payload, sig_header, secret, tolerance_seconds, now)?;
    serde_json::from_slice(payload)
        .map_err(|e| AppError::signature_invalid(format!("Malformed webhook payload: {e}")))
}

/// Build a signature header for `payload` (used by tests and tooling).
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> AppResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::configuration("Invalid webhook secret"))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    let signature = hex::encode(mac.finalize().into_bytes());
    Ok(format!("t={timestamp},v1={signature}"))
}
