//! # propshop-payment
//!
//! Implementations of [`propshop_core::traits::PaymentGateway`] and webhook
//! signature verification.
//!
//! - `stripe`: Stripe Checkout over its REST API
//! - `webhook`: `Stripe-Signature` verification and event parsing
//! - `mock` (feature `mock`): in-process gateway for tests

#[cfg(feature = "mock")]
pub mod mock;
pub mod stripe;
pub mod webhook;

#[cfg(feature = "mock")]
pub use mock::MockPaymentGateway;
pub use stripe::StripeGateway;
pub use webhook::{WebhookEvent, construct_event};
