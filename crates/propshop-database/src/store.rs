//! Store traits consumed by the service layer.
//!
//! Each trait has a PostgreSQL implementation in [`crate::repositories`] and
//! an in-memory implementation in `crate::memory`.

use std::fmt::Debug;

use async_trait::async_trait;
use uuid::Uuid;

use propshop_core::result::AppResult;
use propshop_core::types::pagination::{PageRequest, PageResponse};
use propshop_entity::cart::{CartLine, NewCartLine};
use propshop_entity::notification::{NewNotification, Notification, NotificationSeverity};
use propshop_entity::order::{NewOrder, Order, OrderStatus, PaymentStatus};
use propshop_entity::prop::{CreateProp, Prop, UpdateProp};
use propshop_entity::prop_request::{CreatePropRequest, PropRequest, RequestStatus};
use propshop_entity::user::{CreateUser, User};

/// Prop catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync + Debug + 'static {
    /// Find a prop by id.
    async fn find_prop(&self, id: Uuid) -> AppResult<Option<Prop>>;

    /// Find every prop whose id is in `ids`. Missing ids are skipped.
    async fn find_props(&self, ids: &[Uuid]) -> AppResult<Vec<Prop>>;

    /// List props, newest first.
    async fn list_props(&self, page: &PageRequest) -> AppResult<PageResponse<Prop>>;

    /// Insert a prop.
    async fn create_prop(&self, data: CreateProp) -> AppResult<Prop>;

    /// Apply a partial update. Returns `None` if the prop does not exist.
    async fn update_prop(&self, id: Uuid, update: &UpdateProp) -> AppResult<Option<Prop>>;

    /// Delete a prop. Returns whether a row was removed.
    async fn delete_prop(&self, id: Uuid) -> AppResult<bool>;
}

/// Per-user carts.
#[async_trait]
pub trait CartStore: Send + Sync + Debug + 'static {
    /// Insert a line, or merge into the existing (user, prop) line by adding
    /// quantity and overwriting type and rental days. The flag is `true`
    /// when a new line was created.
    async fn add_or_merge(&self, line: NewCartLine) -> AppResult<(CartLine, bool)>;

    /// Find a line by id.
    async fn find_line(&self, id: Uuid) -> AppResult<Option<CartLine>>;

    /// Lines of a user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<CartLine>>;

    /// Persist quantity, type and rental days of an existing line.
    async fn save_line(&self, line: &CartLine) -> AppResult<CartLine>;

    /// Remove a line. Returns whether it existed.
    async fn remove_line(&self, id: Uuid) -> AppResult<bool>;

    /// Remove every line of a user. Returns the number removed.
    async fn clear(&self, user_id: Uuid) -> AppResult<u64>;
}

/// Order ledger.
#[async_trait]
pub trait OrderStore: Send + Sync + Debug + 'static {
    /// Insert an order.
    ///
    /// Fails with a `Conflict` error when another order already carries the
    /// same payment intent. The check and the insert are atomic.
    async fn insert(&self, order: NewOrder) -> AppResult<Order>;

    /// Find an order by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;

    /// Find the order created for a payment intent.
    async fn find_by_payment_intent(&self, payment_intent_id: &str) -> AppResult<Option<Order>>;

    /// Orders of a user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Order>>;

    /// Every order, newest first.
    async fn list_all(&self) -> AppResult<Vec<Order>>;

    /// Update fulfilment and/or payment status.
    async fn update_status(
        &self,
        id: Uuid,
        status: Option<OrderStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> AppResult<Option<Order>>;

    /// Delete an order. Returns whether it existed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Notification outbox.
#[async_trait]
pub trait NotificationStore: Send + Sync + Debug + 'static {
    /// Insert a notification.
    async fn create(&self, notification: NewNotification) -> AppResult<Notification>;

    /// Notifications of a user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Notification>>;

    /// Notifications of a given severity across all users, newest first.
    async fn list_by_severity(&self, severity: NotificationSeverity)
    -> AppResult<Vec<Notification>>;

    /// Mark one notification read. Returns `None` unless it exists and is
    /// owned by `user_id`.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Notification>>;

    /// Mark all unread notifications of a user read. Returns the count.
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;
}

/// User directory.
#[async_trait]
pub trait UserStore: Send + Sync + Debug + 'static {
    /// Find a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find every user whose id is in `ids`.
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<User>>;

    /// Every administrator.
    async fn list_admins(&self) -> AppResult<Vec<User>>;

    /// Insert a user record.
    async fn create(&self, data: CreateUser) -> AppResult<User>;
}

/// Prop request desk.
#[async_trait]
pub trait PropRequestStore: Send + Sync + Debug + 'static {
    /// Insert a request.
    async fn create(&self, data: CreatePropRequest) -> AppResult<PropRequest>;

    /// Find a request by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PropRequest>>;

    /// Every request, newest first.
    async fn list_all(&self) -> AppResult<Vec<PropRequest>>;

    /// Count requests in a status.
    async fn count_by_status(&self, status: RequestStatus) -> AppResult<i64>;

    /// Set the status. Returns `None` if the request does not exist.
    async fn update_status(&self, id: Uuid, status: RequestStatus)
    -> AppResult<Option<PropRequest>>;
}
