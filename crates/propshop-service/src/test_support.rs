//! Fixtures shared by the service unit tests.

use std::sync::Arc;

use rust_decimal::Decimal;

use propshop_database::memory::MemoryStore;
use propshop_database::store::{CatalogStore, UserStore};
use propshop_entity::prop::{CreateProp, Prop, PropCategory};
use propshop_entity::user::{CreateUser, User, UserRole};
use propshop_payment::MockPaymentGateway;

use crate::context::RequestContext;
use crate::notification::NotificationService;

pub(crate) async fn seed_prop(
    store: &MemoryStore,
    name: &str,
    purchase: i64,
    rental: i64,
    stock: i32,
) -> Prop {
    store
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
        .unwrap()
}

pub(crate) async fn seed_user(store: &MemoryStore, username: &str, role: UserRole) -> User {
    UserStore::create(
        store,
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
    .unwrap()
}

pub(crate) fn ctx(user: &User) -> RequestContext {
    RequestContext::new(user.id, user.role, user.username.clone())
}

pub(crate) fn notification_service(store: &MemoryStore) -> Arc<NotificationService> {
    let shared = Arc::new(store.clone());
    Arc::new(NotificationService::new(
        shared.clone(),
        shared.clone(),
        shared.clone(),
        shared.clone(),
        shared,
    ))
}

pub(crate) fn gateway() -> Arc<MockPaymentGateway> {
    Arc::new(MockPaymentGateway::new())
}
