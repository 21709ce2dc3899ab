//! # propshop-service
//!
//! Business logic service layer for PropShop. Each service orchestrates the
//! store traits from `propshop-database` and the payment gateway to
//! implement application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod context;
pub mod notification;
pub mod order;
pub mod pricing;
pub mod prop_request;

#[cfg(test)]
pub(crate) mod test_support;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use checkout::CheckoutService;
pub use context::RequestContext;
pub use notification::NotificationService;
pub use order::OrderService;
pub use prop_request::PropRequestService;
