//! Route definitions for the PropShop HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. Admin-only
//! routes sit behind [`middleware::rbac::require_admin`].

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let cors = build_cors_layer(&state.config.server.cors);

    let admin_routes = admin_routes().route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::rbac::require_admin,
    ));

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(prop_routes())
        .merge(cart_routes())
        .merge(checkout_routes())
        .merge(order_routes())
        .merge(notification_routes())
        .merge(prop_request_routes())
        .merge(admin_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Public catalog reads
fn prop_routes() -> Router<AppState> {
    Router::new()
        .route("/props", get(handlers::prop::list_props))
        .route("/props/{id}", get(handlers::prop::get_prop))
}

fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart/add", post(handlers::cart::add_to_cart))
        .route("/cart/{user_id}", get(handlers::cart::get_cart))
        .route("/cart/update/{id}", patch(handlers::cart::update_cart_line))
        .route("/cart/remove/{id}", delete(handlers::cart::remove_cart_line))
        .route("/cart/clear/{user_id}", delete(handlers::cart::clear_cart))
}

/// Hosted checkout and the provider callback
fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout-session", post(handlers::checkout::create_session))
        .route("/checkout-session/{id}", get(handlers::checkout::get_session))
        .route("/payments/webhook", post(handlers::payment::webhook))
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(handlers::order::place_order))
        .route("/orders/user/{user_id}", get(handlers::order::list_user_orders))
        .route(
            "/orders/check/{payment_intent_id}",
            get(handlers::order::check_payment_intent),
        )
        .route("/orders/counts/{user_id}", get(handlers::order::order_counts))
        .route(
            "/orders/currently-rented/{user_id}",
            get(handlers::order::currently_rented),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications/user/{user_id}",
            get(handlers::notification::list_user_notifications),
        )
        .route(
            "/notifications/read-all",
            patch(handlers::notification::mark_all_read),
        )
        .route("/notifications/{id}", patch(handlers::notification::mark_read))
}

fn prop_request_routes() -> Router<AppState> {
    Router::new().route("/prop-requests", post(handlers::prop_request::submit))
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(handlers::order::list_all_orders))
        .route(
            "/orders/status/{id}",
            patch(handlers::order::update_order_status),
        )
        .route("/orders/{id}", delete(handlers::order::delete_order))
        .route(
            "/notifications/all",
            get(handlers::notification::list_admin_notifications),
        )
        .route(
            "/prop-requests/pending/count",
            get(handlers::prop_request::pending_count),
        )
        .route("/prop-requests/all", get(handlers::prop_request::list_all))
        .route(
            "/prop-requests/{id}",
            put(handlers::prop_request::update_status),
        )
        .route("/props", post(handlers::prop::create_prop))
        .route(
            "/props/{id}",
            patch(handlers::prop::update_prop).delete(handlers::prop::delete_prop),
        )
}
