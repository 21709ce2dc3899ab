//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use propshop_auth::JwtDecoder;
use propshop_core::config::AppConfig;
use propshop_core::traits::PaymentGateway;
use propshop_database::store::{
    CartStore, CatalogStore, NotificationStore, OrderStore, PropRequestStore, UserStore,
};
use propshop_service::{
    CartService, CatalogService, CheckoutService, NotificationService, OrderService,
    PropRequestService,
};

/// Store handles the services are built from.
///
/// The server passes the Postgres repositories; tests pass one shared
/// in-memory store for every field.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Props.
    pub catalog: Arc<dyn CatalogStore>,
    /// Cart lines.
    pub cart: Arc<dyn CartStore>,
    /// Orders.
    pub orders: Arc<dyn OrderStore>,
    /// Notification outbox.
    pub notifications: Arc<dyn NotificationStore>,
    /// Users.
    pub users: Arc<dyn UserStore>,
    /// Prop requests.
    pub prop_requests: Arc<dyn PropRequestStore>,
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process start, for uptime reporting
    pub started_at: Instant,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Catalog service
    pub catalog_service: Arc<CatalogService>,
    /// Cart service
    pub cart_service: Arc<CartService>,
    /// Checkout orchestrator
    pub checkout_service: Arc<CheckoutService>,
    /// Order queries and administration
    pub order_service: Arc<OrderService>,
    /// Notification outbox
    pub notification_service: Arc<NotificationService>,
    /// Prop request workflow
    pub prop_request_service: Arc<PropRequestService>,
}

impl AppState {
    /// Wires every service from the given stores and payment gateway.
    pub fn new(config: AppConfig, stores: Stores, gateway: Arc<dyn PaymentGateway>) -> Self {
        let notification_service = Arc::new(NotificationService::new(
            Arc::clone(&stores.notifications),
            Arc::clone(&stores.users),
            Arc::clone(&stores.catalog),
            Arc::clone(&stores.orders),
            Arc::clone(&stores.prop_requests),
        ));
        let catalog_service = Arc::new(CatalogService::new(Arc::clone(&stores.catalog)));
        let cart_service = Arc::new(CartService::new(
            Arc::clone(&stores.cart),
            Arc::clone(&stores.catalog),
        ));
        let checkout_service = Arc::new(CheckoutService::new(
            Arc::clone(&stores.catalog),
            Arc::clone(&stores.orders),
            Arc::clone(&stores.cart),
            gateway,
            Arc::clone(&notification_service),
            config.payment.clone(),
        ));
        let order_service = Arc::new(OrderService::new(
            Arc::clone(&stores.orders),
            Arc::clone(&stores.catalog),
        ));
        let prop_request_service = Arc::new(PropRequestService::new(
            Arc::clone(&stores.prop_requests),
            Arc::clone(&stores.users),
            Arc::clone(&notification_service),
        ));

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            started_at: Instant::now(),
            catalog_service,
            cart_service,
            checkout_service,
            order_service,
            notification_service,
            prop_request_service,
        }
    }
}
