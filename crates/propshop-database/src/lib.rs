//! # propshop-database
//!
//! Store traits for every PropShop entity, their PostgreSQL repository
//! implementations, and (behind the `memory` feature) an in-memory store
//! used by tests and local runs.

pub mod connection;
#[cfg(feature = "memory")]
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{CartStore, CatalogStore, NotificationStore, OrderStore, PropRequestStore, UserStore};
