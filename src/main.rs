//! PropShop server: theatre prop rental and sales backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use propshop_api::{AppState, Stores};
use propshop_core::config::{AppConfig, LoggingConfig};
use propshop_core::error::AppError;
use propshop_database::DatabasePool;
use propshop_database::migration::run_migrations;
use propshop_database::repositories::{
    CartRepository, NotificationRepository, OrderRepository, PropRepository,
    PropRequestRepository, UserRepository,
};
use propshop_payment::StripeGateway;

#[tokio::main]
async fn main() {
    let env = std::env::var("PROPSHOP_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);
    tracing::info!(%env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(false)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting PropShop");

    // ── Database connection + migrations ────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(&db.pool()).await?;
    } else {
        tracing::info!("Skipping migrations (database.run_migrations = false)");
    }

    // ── Repositories ────────────────────────────────────────────
    let stores = Stores {
        catalog: Arc::new(PropRepository::new(db.pool())),
        cart: Arc::new(CartRepository::new(db.pool())),
        orders: Arc::new(OrderRepository::new(db.pool())),
        notifications: Arc::new(NotificationRepository::new(db.pool())),
        users: Arc::new(UserRepository::new(db.pool())),
        prop_requests: Arc::new(PropRequestRepository::new(db.pool())),
    };

    // ── Payment provider ────────────────────────────────────────
    let gateway = Arc::new(StripeGateway::new(&config.payment)?);
    if !config.payment.enabled {
        tracing::warn!("Online payments disabled; only cash-on-delivery orders are accepted");
    }

    // ── HTTP server ─────────────────────────────────────────────
    let state = AppState::new(config, stores, gateway);
    let result = propshop_api::serve(state).await;

    db.close().await;
    result
}
