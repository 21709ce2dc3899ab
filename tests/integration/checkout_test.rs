//! Integration tests for order placement and hosted checkout sessions.

mod helpers;

use helpers::{TestApp, intent_owner, num, purchase_line, rental_line};
use http::StatusCode;
use propshop_database::store::CartStore;
use propshop_entity::order::FulfillmentType;
use propshop_entity::cart::NewCartLine;
use propshop_entity::user::UserRole;
use serde_json::json;

#[tokio::test]
async fn test_cod_order_with_matching_total() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let token = app.token_for(&user);
    let prop = app.seed_prop("Cape", 100, 70, 5).await;

    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [purchase_line(prop.id, 2)],
                "delivery_fee": 10,
                "total_price": 210,
                "payment_method": "cod",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    let order = &resp.data()["order"];
    assert_eq!(num(&order["total_price"]), 210.0);
    assert_eq!(order["payment_status"], "not done");
    assert_eq!(order["status"], "Pending");
    assert_eq!(order["payment_method"], "cod");
    assert!(order["payment_intent_id"].is_null());
    assert_eq!(app.store.order_count(), 1);
}

#[tokio::test]
async fn test_total_mismatch_creates_nothing() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let token = app.token_for(&user);
    let prop = app.seed_prop("Cape", 100, 70, 5).await;

    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [purchase_line(prop.id, 2)],
                "delivery_fee": 10,
                "total_price": 200,
                "payment_method": "cod",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), "TOTAL_MISMATCH");
    assert_eq!(app.store.order_count(), 0);
    assert_eq!(app.store.notification_count(), 0);
}

#[tokio::test]
async fn test_rental_line_priced_per_week() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let token = app.token_for(&user);
    let prop = app.seed_prop("Crown", 500, 70, 5).await;

    // 70 per 7 days, 14 days, 2 units
    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [rental_line(prop.id, 2, 14)],
                "total_price": 280,
                "payment_method": "cod",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    let items = resp.data()["order"]["items"].as_array().expect("items").clone();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["type"], "rental");
    assert_eq!(items[0]["rental_days"], 14);
}

#[tokio::test]
async fn test_order_requires_authentication() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;

    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [purchase_line(prop.id, 1)],
                "total_price": 100,
                "payment_method": "cod",
            })),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.error_code(), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_order_for_other_user_is_forbidden() {
    let app = TestApp::new();
    let alice = app.create_user("alice", UserRole::User).await;
    let bob = app.create_user("bob", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;

    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": bob.id,
                "items": [purchase_line(prop.id, 1)],
                "total_price": 100,
                "payment_method": "cod",
            })),
            Some(&app.token_for(&alice)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
async fn test_empty_items_rejected() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;

    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [],
                "total_price": 0,
                "payment_method": "cod",
            })),
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_prop_is_not_found() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;

    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [purchase_line(uuid::Uuid::new_v4(), 1)],
                "total_price": 100,
                "payment_method": "cod",
            })),
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_online_order_is_idempotent_per_intent() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let token = app.token_for(&user);
    let prop = app.seed_prop("Cape", 100, 70, 5).await;
    app.gateway
        .add_intent_with_metadata("pi_direct", "succeeded", 10000, intent_owner(&user));

    let body = json!({
        "user_id": user.id,
        "items": [purchase_line(prop.id, 1)],
        "total_price": 100,
        "payment_method": "online",
        "payment_intent_id": "pi_direct",
    });

    let first = app
        .request("POST", "/api/orders", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.data()["order"]["payment_status"], "done");

    let second = app
        .request("POST", "/api/orders", Some(body), Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(
        second.data()["order"]["id"],
        first.data()["order"]["id"]
    );
    assert_eq!(app.store.order_count(), 1);
}

#[tokio::test]
async fn test_online_order_with_underpaid_intent_rejected() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;
    app.gateway
        .add_intent_with_metadata("pi_cheap", "succeeded", 100, intent_owner(&user));

    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [purchase_line(prop.id, 2)],
                "delivery_fee": 10,
                "total_price": 210,
                "payment_method": "online",
                "payment_intent_id": "pi_cheap",
            })),
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), "TOTAL_MISMATCH");
    assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
async fn test_online_order_with_foreign_intent_forbidden() {
    let app = TestApp::new();
    let alice = app.create_user("alice", UserRole::User).await;
    let bob = app.create_user("bob", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;
    app.gateway
        .add_intent_with_metadata("pi_alice", "succeeded", 10000, intent_owner(&alice));

    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": bob.id,
                "items": [purchase_line(prop.id, 1)],
                "total_price": 100,
                "payment_method": "online",
                "payment_intent_id": "pi_alice",
            })),
            Some(&app.token_for(&bob)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(resp.error_code(), "FORBIDDEN");
    assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
async fn test_online_order_with_unpaid_intent_rejected() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;
    app.gateway.add_intent("pi_pending", "processing", 10000);

    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [purchase_line(prop.id, 1)],
                "total_price": 100,
                "payment_method": "online",
                "payment_intent_id": "pi_pending",
            })),
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
async fn test_checkout_session_created_and_retrieved_by_owner() {
    let app = TestApp::new();
    let alice = app.create_user("alice", UserRole::User).await;
    let bob = app.create_user("bob", UserRole::User).await;
    let token = app.token_for(&alice);
    let cape = app.seed_prop("Cape", 100, 70, 5).await;
    let crown = app.seed_prop("Crown", 500, 70, 5).await;

    let resp = app
        .request(
            "POST",
            "/api/checkout-session",
            Some(json!({
                "user_id": alice.id,
                "items": [purchase_line(cape.id, 2), rental_line(crown.id, 1, 7)],
                "delivery_fee": 25,
                "total_price": 295,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let session_id = resp.data()["session_id"].as_str().expect("session id").to_string();
    assert!(resp.data()["url"].as_str().is_some());

    let requests = app.gateway.created_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.currency, "npr");
    assert_eq!(request.line_items.len(), 3);
    assert_eq!(request.line_items[0].unit_amount, 10000);
    assert_eq!(request.line_items[0].quantity, 2);
    assert_eq!(request.line_items[1].name, "Crown (rental, 7 days)");
    assert_eq!(request.line_items[1].unit_amount, 7000);
    assert_eq!(request.line_items[2].name, "Delivery Fee");
    assert_eq!(request.line_items[2].unit_amount, 2500);
    assert_eq!(request.metadata["user_id"], alice.id.to_string());

    let own = app
        .request(
            "GET",
            &format!("/api/checkout-session/{session_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.data()["metadata"]["user_id"], alice.id.to_string());

    let foreign = app
        .request(
            "GET",
            &format!("/api/checkout-session/{session_id}"),
            None,
            Some(&app.token_for(&bob)),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_checkout_session_total_mismatch() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;

    let resp = app
        .request(
            "POST",
            "/api/checkout-session",
            Some(json!({
                "user_id": user.id,
                "items": [purchase_line(prop.id, 1)],
                "total_price": 1,
            })),
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), "TOTAL_MISMATCH");
    assert!(app.gateway.created_requests().is_empty());
}

#[tokio::test]
async fn test_placed_order_leaves_cart_alone() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;
    app.store
        .add_or_merge(NewCartLine {
            user_id: user.id,
            prop_id: prop.id,
            quantity: 1,
            fulfillment_type: FulfillmentType::Purchase,
            rental_days: None,
        })
        .await
        .expect("cart line");

    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [purchase_line(prop.id, 1)],
                "total_price": 100,
                "payment_method": "cod",
            })),
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    let cart = CartStore::list_for_user(&app.store, user.id)
        .await
        .expect("cart");
    assert_eq!(cart.len(), 1);
}
