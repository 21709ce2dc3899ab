//! Core traits defined in `propshop-core` and implemented by other crates.

pub mod payment;

pub use payment::{
    CheckoutSession, CheckoutSessionRequest, GatewayLineItem, PaymentGateway, PaymentIntent,
};
