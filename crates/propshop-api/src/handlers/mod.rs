//! Route handlers organized by domain.

pub mod cart;
pub mod checkout;
pub mod health;
pub mod notification;
pub mod order;
pub mod payment;
pub mod prop;
pub mod prop_request;
