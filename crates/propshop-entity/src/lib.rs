//! # propshop-entity
//!
//! Domain entity models for PropShop. Every struct in this crate
//! represents a database table row or a domain value object. Table rows
//! additionally derive `sqlx::FromRow`.

pub mod cart;
pub mod notification;
pub mod order;
pub mod prop;
pub mod prop_request;
pub mod user;
