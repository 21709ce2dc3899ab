//! Integration tests for cart endpoints.

mod helpers;

use helpers::{TestApp, num};
use http::StatusCode;
use propshop_entity::user::UserRole;
use serde_json::json;

#[tokio::test]
async fn test_add_merges_matching_line() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let token = app.token_for(&user);
    let prop = app.seed_prop("Cape", 100, 70, 10).await;

    let first = app
        .request(
            "POST",
            "/api/cart/add",
            Some(json!({
                "user_id": user.id,
                "prop_id": prop.id,
                "quantity": 2,
                "type": "purchase",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request(
            "POST",
            "/api/cart/add",
            Some(json!({
                "user_id": user.id,
                "prop_id": prop.id,
                "quantity": 3,
                "type": "purchase",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.data()["quantity"], 5);
    assert_eq!(second.data()["id"], first.data()["id"]);

    let cart = app
        .request("GET", &format!("/api/cart/{}", user.id), None, Some(&token))
        .await;
    assert_eq!(cart.status, StatusCode::OK);
    let lines = cart.data().as_array().expect("lines").clone();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["name"], "Cape");
    assert_eq!(num(&lines[0]["total_price"]), 500.0);
}

#[tokio::test]
async fn test_merge_takes_type_of_latest_add() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let token = app.token_for(&user);
    let prop = app.seed_prop("Crown", 500, 70, 10).await;

    app.request(
        "POST",
        "/api/cart/add",
        Some(json!({ "user_id": user.id, "prop_id": prop.id, "type": "purchase" })),
        Some(&token),
    )
    .await;
    let rental = app
        .request(
            "POST",
            "/api/cart/add",
            Some(json!({
                "user_id": user.id,
                "prop_id": prop.id,
                "type": "rental",
                "rental_days": 14,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(rental.status, StatusCode::OK);
    assert_eq!(rental.data()["type"], "rental");
    assert_eq!(rental.data()["quantity"], 2);
    assert_eq!(num(&rental.data()["base_price"]), 140.0);
    assert_eq!(num(&rental.data()["total_price"]), 280.0);

    let cart = app
        .request("GET", &format!("/api/cart/{}", user.id), None, Some(&token))
        .await;
    assert_eq!(cart.data().as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_rental_without_days_rejected() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let prop = app.seed_prop("Crown", 500, 70, 10).await;

    let resp = app
        .request(
            "POST",
            "/api/cart/add",
            Some(json!({ "user_id": user.id, "prop_id": prop.id, "type": "rental" })),
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_empty_cart_is_not_found() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;

    let resp = app
        .request(
            "GET",
            &format!("/api/cart/{}", user.id),
            None,
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_zero_quantity_update_removes_line() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let token = app.token_for(&user);
    let prop = app.seed_prop("Cape", 100, 70, 10).await;

    let added = app
        .request(
            "POST",
            "/api/cart/add",
            Some(json!({ "user_id": user.id, "prop_id": prop.id, "type": "purchase" })),
            Some(&token),
        )
        .await;
    let line_id = added.data()["id"].as_str().expect("line id").to_string();

    let updated = app
        .request(
            "PATCH",
            &format!("/api/cart/update/{line_id}"),
            Some(json!({ "quantity": 4 })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["quantity"], 4);

    let removed = app
        .request(
            "PATCH",
            &format!("/api/cart/update/{line_id}"),
            Some(json!({ "quantity": 0 })),
            Some(&token),
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    assert!(removed.data().is_null());

    let cart = app
        .request("GET", &format!("/api/cart/{}", user.id), None, Some(&token))
        .await;
    assert_eq!(cart.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_foreign_cart_is_forbidden() {
    let app = TestApp::new();
    let alice = app.create_user("alice", UserRole::User).await;
    let bob = app.create_user("bob", UserRole::User).await;
    let prop = app.seed_prop("Cape", 100, 70, 10).await;

    let added = app
        .request(
            "POST",
            "/api/cart/add",
            Some(json!({ "user_id": alice.id, "prop_id": prop.id, "type": "purchase" })),
            Some(&app.token_for(&alice)),
        )
        .await;
    let line_id = added.data()["id"].as_str().expect("line id").to_string();
    let bob_token = app.token_for(&bob);

    let view = app
        .request("GET", &format!("/api/cart/{}", alice.id), None, Some(&bob_token))
        .await;
    assert_eq!(view.status, StatusCode::FORBIDDEN);

    let remove = app
        .request(
            "DELETE",
            &format!("/api/cart/remove/{line_id}"),
            None,
            Some(&bob_token),
        )
        .await;
    assert_eq!(remove.status, StatusCode::FORBIDDEN);

    let add_for_alice = app
        .request(
            "POST",
            "/api/cart/add",
            Some(json!({ "user_id": alice.id, "prop_id": prop.id, "type": "purchase" })),
            Some(&bob_token),
        )
        .await;
    assert_eq!(add_for_alice.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_clear_cart() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let token = app.token_for(&user);
    let cape = app.seed_prop("Cape", 100, 70, 10).await;
    let crown = app.seed_prop("Crown", 500, 70, 10).await;

    for prop_id in [cape.id, crown.id] {
        app.request(
            "POST",
            "/api/cart/add",
            Some(json!({ "user_id": user.id, "prop_id": prop_id, "type": "purchase" })),
            Some(&token),
        )
        .await;
    }

    let resp = app
        .request(
            "DELETE",
            &format!("/api/cart/clear/{}", user.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.data()["removed"], 2);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;

    let resp = app
        .request(
            "GET",
            "/api/cart/not-a-uuid",
            None,
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}
