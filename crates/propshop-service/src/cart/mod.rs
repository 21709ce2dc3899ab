//! Cart management.

pub mod service;

pub use service::{AddToCart, CartLineView, CartService, UpdateCartLine};
