//! # propshop-core
//!
//! Core crate for PropShop. Contains configuration schemas, the payment
//! gateway trait, pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PropShop crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
