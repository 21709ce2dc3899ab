//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use propshop_api::{AppState, Stores, build_app};
use propshop_auth::JwtEncoder;
use propshop_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, PaymentConfig, ServerConfig,
};
use propshop_database::memory::MemoryStore;
use propshop_database::store::{CatalogStore, UserStore};
use propshop_entity::prop::{CreateProp, Prop, PropCategory};
use propshop_entity::user::{CreateUser, User, UserRole};
use propshop_payment::MockPaymentGateway;
use propshop_payment::webhook::sign_payload;

/// Webhook signing secret used by every test app.
pub const WEBHOOK_SECRET: &str = "whsec_integration";

const JWT_SECRET: &str = "integration-test-secret-with-enough-length";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory store shared by every service
    pub store: MemoryStore,
    /// Mock payment provider
    pub gateway: Arc<MockPaymentGateway>,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application over an empty store
    pub fn new() -> Self {
        let config = test_config();
        let store = MemoryStore::new();
        let shared = Arc::new(store.clone());
        let stores = Stores {
            catalog: shared.clone(),
            cart: shared.clone(),
            orders: shared.clone(),
            notifications: shared.clone(),
            users: shared.clone(),
            prop_requests: shared,
        };
        let gateway = Arc::new(MockPaymentGateway::new());
        let state = AppState::new(config.clone(), stores, gateway.clone());

        Self {
            router: build_app(state),
            encoder: JwtEncoder::new(&config.auth),
            store,
            gateway,
            config,
        }
    }

    /// Create a user record
    pub async fn create_user(&self, username: &str, role: UserRole) -> User {
        UserStore::create(
            &self.store,
            CreateUser {
                username: username.to_string(),
                full_name: None,
                email: format!("{username}@propshop.test"),
                contact_no: None,
                role,
                address: None,
            },
        )
        .await
        .expect("Failed to create user")
    }

    /// Mint an access token for a user
    pub fn token_for(&self, user: &User) -> String {
        self.encoder
            .generate_access_token(user.id, user.role, &user.username)
            .expect("Failed to mint token")
            .0
    }

    /// Add a prop to the catalog
    pub async fn seed_prop(&self, name: &str, purchase: i64, rental: i64, stock: i32) -> Prop {
        self.store
            .create_prop(CreateProp {
                name: name.to_string(),
                image: format!("{}.png", name.to_lowercase()),
                description: format!("{name} for the stage"),
                categories: vec![PropCategory::Costume],
                purchase_price: Decimal::from(purchase),
                rental_price: Decimal::from(rental),
                available_stock: stock,
                has_discount: false,
                discount_type: None,
                discount_percent: None,
                discount_start: None,
                discount_end: None,
            })
            .await
            .expect("Failed to create prop")
    }

    /// Make a JSON request against the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Post a raw webhook body with an optional `Stripe-Signature` header
    pub async fn post_webhook(&self, payload: &[u8], signature: Option<&str>) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri("/api/payments/webhook")
            .header("Content-Type", "application/json");

        if let Some(signature) = signature {
            req = req.header("Stripe-Signature", signature);
        }

        let req = req
            .body(Body::from(payload.to_vec()))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Configuration with a fixed JWT secret and payments enabled
pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
            max_lifetime_seconds: 0,
            run_migrations: false,
        },
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
            ..AuthConfig::default()
        },
        payment: PaymentConfig {
            enabled: true,
            webhook_secret: WEBHOOK_SECRET.to_string(),
            ..PaymentConfig::default()
        },
        logging: LoggingConfig::default(),
    }
}

/// Build a `Stripe-Signature` header value for `payload` at `timestamp`
pub fn sign(payload: &[u8], secret: &str, timestamp: i64) -> String {
    sign_payload(payload, secret, timestamp).expect("Failed to sign payload")
}

/// A `checkout.session.completed` event body
pub fn completed_event(payment_intent: &str, metadata: Value) -> Vec<u8> {
    serde_json::json!({
        "id": format!("evt_{payment_intent}"),
        "type": "checkout.session.completed",
        "data": { "object": {
            "id": format!("cs_{payment_intent}"),
            "object": "checkout.session",
            "payment_intent": payment_intent,
            "payment_status": "paid",
            "metadata": metadata,
        }}
    })
    .to_string()
    .into_bytes()
}

/// Payment intent metadata naming `user` as the payer
pub fn intent_owner(user: &User) -> BTreeMap<String, String> {
    BTreeMap::from([("user_id".to_string(), user.id.to_string())])
}

/// One purchase line as JSON
pub fn purchase_line(prop_id: Uuid, quantity: i32) -> Value {
    serde_json::json!({ "prop_id": prop_id, "quantity": quantity, "type": "purchase" })
}

/// One rental line as JSON
pub fn rental_line(prop_id: Uuid, quantity: i32, days: i32) -> Value {
    serde_json::json!({
        "prop_id": prop_id,
        "quantity": quantity,
        "type": "rental",
        "rental_days": days,
    })
}

/// Read a JSON number as `f64`
pub fn num(value: &Value) -> f64 {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .expect("expected a number")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
