//! `MemoryStore` and its store trait implementations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use propshop_core::error::AppError;
use propshop_core::result::AppResult;
use propshop_core::types::pagination::{PageRequest, PageResponse};
use propshop_entity::cart::{CartLine, NewCartLine};
use propshop_entity::notification::{NewNotification, Notification, NotificationSeverity};
use propshop_entity::order::{NewOrder, Order, OrderStatus, PaymentStatus};
use propshop_entity::prop::{CreateProp, Prop, UpdateProp};
use propshop_entity::prop_request::{CreatePropRequest, PropRequest, RequestStatus};
use propshop_entity::user::{CreateUser, User};

use crate::store::{
    CartStore, CatalogStore, NotificationStore, OrderStore, PropRequestStore, UserStore,
};

/// Process-local store backed by concurrent maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    props: Arc<DashMap<Uuid, Prop>>,
    cart: Arc<DashMap<Uuid, CartLine>>,
    orders: Arc<DashMap<Uuid, Order>>,
    notifications: Arc<DashMap<Uuid, Notification>>,
    users: Arc<DashMap<Uuid, User>>,
    prop_requests: Arc<DashMap<Uuid, PropRequest>>,
    /// Serializes cart upserts and order inserts.
    write_lock: Arc<Mutex<()>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of stored notifications.
    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }
}

fn newest_first<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_prop(&self, id: Uuid) -> AppResult<Option<Prop>> {
        Ok(self.props.get(&id).map(|p| p.clone()))
    }

    async fn find_props(&self, ids: &[Uuid]) -> AppResult<Vec<Prop>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.props.get(id).map(|p| p.clone()))
            .collect())
    }

    async fn list_props(&self, page: &PageRequest) -> AppResult<PageResponse<Prop>> {
        let all = newest_first(
            self.props.iter().map(|p| p.clone()).collect(),
            |p: &Prop| p.created_at,
        );
        Ok(page.paginate(all))
    }

    async fn create_prop(&self, data: CreateProp) -> AppResult<Prop> {
        let prop = data.into_prop();
        self.props.insert(prop.id, prop.clone());
        Ok(prop)
    }

    async fn update_prop(&self, id: Uuid, update: &UpdateProp) -> AppResult<Option<Prop>> {
        Ok(self.props.get_mut(&id).map(|mut entry| {
            update.apply_to(entry.value_mut());
            entry.clone()
        }))
    }

    async fn delete_prop(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.props.remove(&id).is_some())
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn add_or_merge(&self, line: NewCartLine) -> AppResult<(CartLine, bool)> {
        let _guard = self.write_lock.lock().await;

        let existing = self
            .cart
            .iter()
            .find(|l| l.user_id == line.user_id && l.prop_id == line.prop_id)
            .map(|l| l.id);

        if let Some(id) = existing {
            if let Some(mut entry) = self.cart.get_mut(&id) {
                let merged = entry.value_mut();
                merged.quantity += line.quantity;
                merged.fulfillment_type = line.fulfillment_type;
                merged.rental_days = line.rental_days;
                return Ok((merged.clone(), false));
            }
        }

        let created = CartLine {
            id: Uuid::new_v4(),
            user_id: line.user_id,
            prop_id: line.prop_id,
            quantity: line.quantity,
            fulfillment_type: line.fulfillment_type,
            rental_days: line.rental_days,
            added_at: Utc::now(),
        };
        self.cart.insert(created.id, created.clone());
        Ok((created, true))
    }

    async fn find_line(&self, id: Uuid) -> AppResult<Option<CartLine>> {
        Ok(self.cart.get(&id).map(|l| l.clone()))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<CartLine>> {
        Ok(newest_first(
            self.cart
                .iter()
                .filter(|l| l.user_id == user_id)
                .map(|l| l.clone())
                .collect(),
            |l: &CartLine| l.added_at,
        ))
    }

    async fn save_line(&self, line: &CartLine) -> AppResult<CartLine> {
        let mut entry = self
            .cart
            .get_mut(&line.id)
            .ok_or_else(|| AppError::not_found("Cart item not found"))?;
        let stored = entry.value_mut();
        stored.quantity = line.quantity;
        stored.fulfillment_type = line.fulfillment_type;
        stored.rental_days = line.rental_days;
        Ok(stored.clone())
    }

    async fn remove_line(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.cart.remove(&id).is_some())
    }

    async fn clear(&self, user_id: Uuid) -> AppResult<u64> {
        let mut removed = 0u64;
        self.cart.retain(|_, l| {
            let keep = l.user_id != user_id;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert(&self, order: NewOrder) -> AppResult<Order> {
        let _guard = self.write_lock.lock().await;

        if let Some(pi) = order.payment_intent_id.as_deref() {
            let taken = self
                .orders
                .iter()
                .any(|o| o.payment_intent_id.as_deref() == Some(pi));
            if taken {
                debug!(payment_intent_id = pi, "Duplicate payment intent rejected");
                return Err(AppError::conflict(format!(
                    "An order already exists for payment intent {pi}"
                )));
            }
        }

        let order = order.into_order();
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        Ok(self.orders.get(&id).map(|o| o.clone()))
    }

    async fn find_by_payment_intent(&self, payment_intent_id: &str) -> AppResult<Option<Order>> {
        Ok(self
            .orders
            .iter()
            .find(|o| o.payment_intent_id.as_deref() == Some(payment_intent_id))
            .map(|o| o.clone()))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Order>> {
        Ok(newest_first(
            self.orders
                .iter()
                .filter(|o| o.user_id == user_id)
                .map(|o| o.clone())
                .collect(),
            |o: &Order| o.order_date,
        ))
    }

    async fn list_all(&self) -> AppResult<Vec<Order>> {
        Ok(newest_first(
            self.orders.iter().map(|o| o.clone()).collect(),
            |o: &Order| o.order_date,
        ))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: Option<OrderStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> AppResult<Option<Order>> {
        Ok(self.orders.get_mut(&id).map(|mut entry| {
            let order = entry.value_mut();
            if let Some(status) = status {
                order.status = status;
            }
            if let Some(payment_status) = payment_status {
                order.payment_status = payment_status;
            }
            order.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.orders.remove(&id).is_some())
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        let notification = notification.into_notification();
        self.notifications
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        Ok(newest_first(
            self.notifications
                .iter()
                .filter(|n| n.user_id == user_id)
                .map(|n| n.clone())
                .collect(),
            |n: &Notification| n.created_at,
        ))
    }

    async fn list_by_severity(
        &self,
        severity: NotificationSeverity,
    ) -> AppResult<Vec<Notification>> {
        Ok(newest_first(
            self.notifications
                .iter()
                .filter(|n| n.severity == severity)
                .map(|n| n.clone())
                .collect(),
            |n: &Notification| n.created_at,
        ))
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Notification>> {
        Ok(self
            .notifications
            .get_mut(&id)
            .filter(|n| n.user_id == user_id)
            .map(|mut entry| {
                entry.is_read = true;
                entry.clone()
            }))
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let mut count = 0;
        for mut entry in self.notifications.iter_mut() {
            if entry.user_id == user_id && !entry.is_read {
                entry.is_read = true;
                count += 1;
            }
        }
        Ok(count)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.users.get(id).map(|u| u.clone()))
            .collect())
    }

    async fn list_admins(&self) -> AppResult<Vec<User>> {
        Ok(self
            .users
            .iter()
            .filter(|u| u.is_admin())
            .map(|u| u.clone())
            .collect())
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let duplicate = self
            .users
            .iter()
            .any(|u| u.username == data.username || u.email == data.email);
        if duplicate {
            return Err(AppError::conflict("Username or email already exists"));
        }
        let user = data.into_user();
        self.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl PropRequestStore for MemoryStore {
    async fn create(&self, data: CreatePropRequest) -> AppResult<PropRequest> {
        let request = data.into_request();
        self.prop_requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PropRequest>> {
        Ok(self.prop_requests.get(&id).map(|r| r.clone()))
    }

    async fn list_all(&self) -> AppResult<Vec<PropRequest>> {
        Ok(newest_first(
            self.prop_requests.iter().map(|r| r.clone()).collect(),
            |r: &PropRequest| r.created_at,
        ))
    }

    async fn count_by_status(&self, status: RequestStatus) -> AppResult<i64> {
        Ok(self
            .prop_requests
            .iter()
            .filter(|r| r.status == status)
            .count() as i64)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> AppResult<Option<PropRequest>> {
        Ok(self.prop_requests.get_mut(&id).map(|mut entry| {
            entry.status = status;
            entry.updated_at = Utc::now();
            entry.clone()
        }))
    }
}
