//! Stripe Checkout provider.

mod client;
mod form;

pub use client::StripeGateway;
