//! Integration tests for notification fan-out and the notification endpoints.

mod helpers;

use helpers::{TestApp, purchase_line};
use http::StatusCode;
use propshop_entity::user::{User, UserRole};
use serde_json::{Value, json};

async fn place_three_line_order(app: &TestApp, user: &User) -> Value {
    let cape = app.seed_prop("Cape", 100, 70, 10).await;
    let crown = app.seed_prop("Crown", 50, 70, 10).await;
    let sword = app.seed_prop("Sword", 25, 70, 10).await;

    let resp = app
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "user_id": user.id,
                "items": [
                    purchase_line(cape.id, 1),
                    purchase_line(crown.id, 1),
                    purchase_line(sword.id, 2),
                ],
                "total_price": 200,
                "payment_method": "cod",
            })),
            Some(&app.token_for(user)),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    resp.data()["order"].clone()
}

#[tokio::test]
async fn test_order_fans_out_to_customer_and_admins() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let admin_one = app.create_user("admin1", UserRole::Admin).await;
    let admin_two = app.create_user("admin2", UserRole::Admin).await;

    let order = place_three_line_order(&app, &user).await;
    assert_eq!(app.store.notification_count(), 3);

    let resp = app
        .request(
            "GET",
            &format!("/api/notifications/user/{}", user.id),
            None,
            Some(&app.token_for(&user)),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let list = resp.data().as_array().expect("notifications").clone();
    assert_eq!(list.len(), 1);

    let own = &list[0];
    assert_eq!(own["type"], "success");
    assert_eq!(own["is_read"], false);
    assert_eq!(
        own["message"],
        "Your order for \"Cape\" and 2 other prop(s) has been placed successfully. We'll notify you once it is shipped."
    );
    assert_eq!(own["related"]["model"], "Order");
    assert_eq!(own["related"]["id"], order["id"]);
    assert_eq!(own["related"]["prop_names"], json!(["Cape", "Crown", "Sword"]));

    for admin in [&admin_one, &admin_two] {
        let feed = app
            .request(
                "GET",
                &format!("/api/notifications/user/{}", admin.id),
                None,
                Some(&app.token_for(admin)),
            )
            .await;
        let list = feed.data().as_array().expect("notifications").clone();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["type"], "warning");
        assert_eq!(
            list[0]["message"],
            "An order for \"Cape\" and 2 other prop(s) has been placed."
        );
    }
}

#[tokio::test]
async fn test_mark_read_only_own_notification() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let other = app.create_user("bob", UserRole::User).await;
    place_three_line_order(&app, &user).await;

    let token = app.token_for(&user);
    let list = app
        .request(
            "GET",
            &format!("/api/notifications/user/{}", user.id),
            None,
            Some(&token),
        )
        .await;
    let id = list.data()[0]["id"].as_str().expect("id").to_string();

    let foreign = app
        .request(
            "PATCH",
            &format!("/api/notifications/{id}"),
            None,
            Some(&app.token_for(&other)),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);

    let own = app
        .request("PATCH", &format!("/api/notifications/{id}"), None, Some(&token))
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.data()["is_read"], true);
}

#[tokio::test]
async fn test_mark_all_read() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    place_three_line_order(&app, &user).await;
    place_three_line_order(&app, &user).await;
    let token = app.token_for(&user);

    let resp = app
        .request("PATCH", "/api/notifications/read-all", None, Some(&token))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.data()["marked"], 2);

    let list = app
        .request(
            "GET",
            &format!("/api/notifications/user/{}", user.id),
            None,
            Some(&token),
        )
        .await;
    let all_read = list
        .data()
        .as_array()
        .expect("notifications")
        .iter()
        .all(|n| n["is_read"] == true);
    assert!(all_read);
}

#[tokio::test]
async fn test_foreign_notification_list_forbidden() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let other = app.create_user("bob", UserRole::User).await;

    let resp = app
        .request(
            "GET",
            &format!("/api/notifications/user/{}", user.id),
            None,
            Some(&app.token_for(&other)),
        )
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_feed_shows_warnings_only() {
    let app = TestApp::new();
    let user = app.create_user("alice", UserRole::User).await;
    let admin = app.create_user("admin", UserRole::Admin).await;
    place_three_line_order(&app, &user).await;

    let denied = app
        .request(
            "GET",
            "/api/notifications/all",
            None,
            Some(&app.token_for(&user)),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let feed = app
        .request(
            "GET",
            "/api/notifications/all",
            None,
            Some(&app.token_for(&admin)),
        )
        .await;
    assert_eq!(feed.status, StatusCode::OK);
    let list = feed.data().as_array().expect("feed").clone();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["type"], "warning");
    assert_eq!(list[0]["recipient"]["username"], "admin");
}
