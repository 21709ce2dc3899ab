//! Integration tests for the payment provider webhook.

mod helpers;

use chrono::Utc;
use helpers::{TestApp, WEBHOOK_SECRET, completed_event, intent_owner, num, purchase_line, sign};
use http::StatusCode;
use propshop_database::store::CartStore;
use propshop_entity::cart::NewCartLine;
use propshop_entity::order::FulfillmentType;
use propshop_entity::user::{User, UserRole};
use serde_json::{Value, json};
use uuid::Uuid;

fn metadata(user: &User, prop_id: Uuid) -> Value {
    json!({
        "user_id": user.id.to_string(),
        "items": json!([{ "prop_id": prop_id, "quantity": 2, "type": "purchase" }]).to_string(),
        "deliveryFee": "10",
        "total_price": "210",
    })
}

async fn fill_cart(app: &TestApp, user: &User, prop_id: Uuid) {
    app.store
        .add_or_merge(NewCartLine {
            user_id: user.id,
            prop_id,
            quantity: 2,
            fulfillment_type: FulfillmentType::Purchase,
            rental_days: None,
        })
        .await
        .expect("cart line");
}

#[tokio::test]
async fn test_completed_session_creates_one_order() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;
    fill_cart(&app, &user, prop.id).await;

    let payload = completed_event("pi_123", metadata(&user, prop.id));
    let signature = sign(&payload, WEBHOOK_SECRET, Utc::now().timestamp());

    let first = app.post_webhook(&payload, Some(&signature)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.data()["received"], true);

    // Provider retries deliver the same event again
    let second = app.post_webhook(&payload, Some(&signature)).await;
    assert_eq!(second.status, StatusCode::OK);

    assert_eq!(app.store.order_count(), 1);
    let cart = CartStore::list_for_user(&app.store, user.id)
        .await
        .expect("cart");
    assert!(cart.is_empty());

    let check = app
        .request(
            "GET",
            "/api/orders/check/pi_123",
            None,
            Some(&app.token_for(&user)),
        )
        .await;
    assert_eq!(check.status, StatusCode::OK);
    assert_eq!(check.data()["exists"], true);
    let order = &check.data()["order"];
    assert_eq!(order["payment_method"], "online");
    assert_eq!(order["payment_status"], "done");
    assert_eq!(num(&order["total_price"]), 210.0);
}

#[tokio::test]
async fn test_invalid_signature_rejected() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;

    let payload = completed_event("pi_bad", metadata(&user, prop.id));
    let signature = sign(&payload, "whsec_wrong", Utc::now().timestamp());

    let resp = app.post_webhook(&payload, Some(&signature)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), "INVALID_SIGNATURE");
    assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
async fn test_missing_signature_rejected() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;

    let payload = completed_event("pi_unsigned", metadata(&user, prop.id));
    let resp = app.post_webhook(&payload, None).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
async fn test_tampered_payload_rejected() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;

    let payload = completed_event("pi_tamper", metadata(&user, prop.id));
    let signature = sign(&payload, WEBHOOK_SECRET, Utc::now().timestamp());
    let tampered = String::from_utf8(payload)
        .expect("utf8")
        .replace("\"210\"", "\"1\"");

    let resp = app.post_webhook(tampered.as_bytes(), Some(&signature)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
async fn test_stale_timestamp_rejected() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;

    let payload = completed_event("pi_stale", metadata(&user, prop.id));
    let signature = sign(&payload, WEBHOOK_SECRET, Utc::now().timestamp() - 3600);

    let resp = app.post_webhook(&payload, Some(&signature)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
async fn test_other_event_types_acknowledged() {
    let app = TestApp::new();

    let payload = json!({
        "id": "evt_other",
        "type": "payment_intent.created",
        "data": { "object": { "id": "pi_other" } }
    })
    .to_string()
    .into_bytes();
    let signature = sign(&payload, WEBHOOK_SECRET, Utc::now().timestamp());

    let resp = app.post_webhook(&payload, Some(&signature)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
async fn test_unprocessable_session_still_acknowledged() {
    let app = TestApp::new();

    let payload = completed_event("pi_nometa", json!({}));
    let signature = sign(&payload, WEBHOOK_SECRET, Utc::now().timestamp());

    let resp = app.post_webhook(&payload, Some(&signature)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(app.store.order_count(), 0);
}

#[tokio::test]
async fn test_check_payment_intent_ownership() {
    let app = TestApp::new();
    let alice = app.create_user("alice", UserRole::User).await;
    let bob = app.create_user("bob", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;

    let missing = app
        .request(
            "GET",
            "/api/orders/check/pi_owned",
            None,
            Some(&app.token_for(&alice)),
        )
        .await;
    assert_eq!(missing.status, StatusCode::OK);
    assert_eq!(missing.data()["exists"], false);

    let payload = completed_event("pi_owned", metadata(&alice, prop.id));
    let signature = sign(&payload, WEBHOOK_SECRET, Utc::now().timestamp());
    app.post_webhook(&payload, Some(&signature)).await;

    let foreign = app
        .request(
            "GET",
            "/api/orders/check/pi_owned",
            None,
            Some(&app.token_for(&bob)),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_webhook_after_direct_order_is_duplicate() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    app.create_user("admin", UserRole::Admin).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;
    app.gateway
        .add_intent_with_metadata("pi_both", "succeeded", 21000, intent_owner(&user));

    let placed = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [purchase_line(prop.id, 2)],
                "delivery_fee": 10,
                "total_price": 210,
                "payment_method": "online",
                "payment_intent_id": "pi_both",
            })),
            Some(&app.token_for(&user)),
        )
        .await;
    assert_eq!(placed.status, StatusCode::CREATED);
    let notified = app.store.notification_count();

    let payload = completed_event("pi_both", metadata(&user, prop.id));
    let signature = sign(&payload, WEBHOOK_SECRET, Utc::now().timestamp());
    let resp = app.post_webhook(&payload, Some(&signature)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(app.store.order_count(), 1);
    assert_eq!(app.store.notification_count(), notified);
}

#[tokio::test]
async fn test_direct_order_after_webhook_returns_existing() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    app.create_user("admin", UserRole::Admin).await;
    let prop = app.seed_prop("Cape", 100, 70, 5).await;
    app.gateway
        .add_intent_with_metadata("pi_both", "succeeded", 21000, intent_owner(&user));

    let payload = completed_event("pi_both", metadata(&user, prop.id));
    let signature = sign(&payload, WEBHOOK_SECRET, Utc::now().timestamp());
    let resp = app.post_webhook(&payload, Some(&signature)).await;
    assert_eq!(resp.status, StatusCode::OK);
    let notified = app.store.notification_count();

    let placed = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [purchase_line(prop.id, 2)],
                "delivery_fee": 10,
                "total_price": 210,
                "payment_method": "online",
                "payment_intent_id": "pi_both",
            })),
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(placed.status, StatusCode::OK);
    assert_eq!(app.store.order_count(), 1);
    assert_eq!(app.store.notification_count(), notified);
}
