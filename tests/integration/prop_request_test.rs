//! Integration tests for prop requests, catalog administration, and health.

mod helpers;

use helpers::{TestApp, num};
use http::StatusCode;
use propshop_entity::user::UserRole;
use serde_json::json;

#[tokio::test]
async fn test_submit_notifies_requester_and_admins() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let admin = app.create_user("admin", UserRole::Admin).await;

    let resp = app
        .request(
            "POST",
            "/api/prop-requests",
            Some(json!({
                "user_id": user.id,
                "prop_name": "  Golden Harp  ",
                "description": "For the finale",
                "urgency": "high",
                "reason": "out-of-stock",
            })),
            Some(&app.token_for(&user)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.data()["prop_name"], "Golden Harp");
    assert_eq!(resp.data()["status"], "pending");
    assert_eq!(resp.data()["urgency"], "high");
    assert_eq!(app.store.notification_count(), 2);

    let own = app
        .request(
            "GET",
            &format!("/api/notifications/user/{}", user.id),
            None,
            Some(&app.token_for(&user)),
        )
        .await;
    let own = own.data()[0].clone();
    assert_eq!(own["type"], "info");
    assert_eq!(own["related"]["model"], "PropRequest");
    assert_eq!(own["related"]["prop_name"], "Golden Harp");

    let feed = app
        .request(
            "GET",
            "/api/notifications/all",
            None,
            Some(&app.token_for(&admin)),
        )
        .await;
    assert_eq!(
        feed.data()[0]["message"],
        "New prop request: \"Golden Harp\" by alice."
    );
}

#[tokio::test]
async fn test_submit_for_other_user_forbidden() {
    let app = TestApp::new();
    let alice = app.create_user("alice", UserRole::User).await;
    let bob = app.create_user("bob", UserRole::User).await;

    let resp = app
        .request(
            "POST",
            "/api/prop-requests",
            Some(json!({ "user_id": bob.id, "prop_name": "Harp" })),
            Some(&app.token_for(&alice)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_review_flow() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let admin = app.create_user("admin", UserRole::Admin).await;
    let user_token = app.token_for(&user);
    let admin_token = app.token_for(&admin);

    for name in ["Harp", "Lute"] {
        app.request(
            "POST",
            "/api/prop-requests",
            Some(json!({ "user_id": user.id, "prop_name": name })),
            Some(&user_token),
        )
        .await;
    }

    let denied = app
        .request(
            "GET",
            "/api/prop-requests/pending/count",
            None,
            Some(&user_token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let anonymous = app
        .request("GET", "/api/prop-requests/all", None, None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let count = app
        .request(
            "GET",
            "/api/prop-requests/pending/count",
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(count.status, StatusCode::OK);
    assert_eq!(count.data()["count"], 2);

    let all = app
        .request("GET", "/api/prop-requests/all", None, Some(&admin_token))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    let requests = all.data().as_array().expect("requests").clone();
    assert_eq!(requests.len(), 2);
    assert!(
        requests
            .iter()
            .all(|r| r["requester"]["username"] == "alice")
    );

    let id = requests[0]["id"].as_str().expect("id").to_string();
    let updated = app
        .request(
            "PUT",
            &format!("/api/prop-requests/{id}"),
            Some(json!({ "status": "approved" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["status"], "approved");

    let count = app
        .request(
            "GET",
            "/api/prop-requests/pending/count",
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(count.data()["count"], 1);

    let own = app
        .request(
            "GET",
            &format!("/api/notifications/user/{}", user.id),
            None,
            Some(&user_token),
        )
        .await;
    let approved = own
        .data()
        .as_array()
        .expect("notifications")
        .iter()
        .any(|n| n["type"] == "success" && n["message"].as_str().is_some_and(|m| m.contains("approved")));
    assert!(approved);
}

#[tokio::test]
async fn test_update_unknown_request_not_found() {
    let app = TestApp::new();
    let admin = app.create_user("admin", UserRole::Admin).await;

    let resp = app
        .request(
            "PUT",
            &format!("/api/prop-requests/{}", uuid::Uuid::new_v4()),
            Some(json!({ "status": "rejected" })),
            Some(&app.token_for(&admin)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_manages_catalog() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let admin = app.create_user("admin", UserRole::Admin).await;
    let admin_token = app.token_for(&admin);

    let body = json!({
        "name": "Velvet Curtain",
        "image": "curtain.png",
        "description": "Red velvet",
        "categories": ["Set & Stage Decor"],
        "purchase_price": 1200,
        "rental_price": 150,
        "available_stock": 0,
    });

    let denied = app
        .request("POST", "/api/props", Some(body.clone()), Some(&app.token_for(&user)))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let created = app
        .request("POST", "/api/props", Some(body), Some(&admin_token))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["is_available"], false);
    let id = created.data()["id"].as_str().expect("id").to_string();

    let updated = app
        .request(
            "PATCH",
            &format!("/api/props/{id}"),
            Some(json!({ "available_stock": 3 })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["is_available"], true);

    let fetched = app.request("GET", &format!("/api/props/{id}"), None, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(num(&fetched.data()["rental_price"]), 150.0);

    let listed = app.request("GET", "/api/props?page=1&per_page=10", None, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.data()["total_items"], 1);

    let deleted = app
        .request("DELETE", &format!("/api/props/{id}"), None, Some(&admin_token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.request("GET", &format!("/api/props/{id}"), None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_prop_rejected() {
    let app = TestApp::new();
    let admin = app.create_user("admin", UserRole::Admin).await;

    let resp = app
        .request(
            "POST",
            "/api/props",
            Some(json!({
                "name": "Broken",
                "categories": [],
                "purchase_price": 10,
                "rental_price": 5,
                "available_stock": 1,
            })),
            Some(&app.token_for(&admin)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let resp = app.request("GET", "/api/health", None, None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.data()["status"], "ok");
}
