//! Checkout orchestration: direct placement, hosted sessions, and webhook
//! reconciliation.

pub mod metadata;
pub mod service;

pub use metadata::CheckoutMetadata;
pub use service::{
    CheckoutRequest, CheckoutService, CheckoutSessionCreated, CheckoutSessionSummary,
    PlaceOrderRequest, PlacedOrder, WebhookOutcome,
};
