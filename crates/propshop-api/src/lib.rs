//! # propshop-api
//!
//! HTTP API layer for PropShop built on Axum.
//!
//! Provides the REST endpoints under `/api`, the payment webhook, the
//! bearer-token extractor, admin guard, CORS and logging middleware, DTOs,
//! and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::{AppState, Stores};
