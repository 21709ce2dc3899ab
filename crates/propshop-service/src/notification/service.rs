//! Notification creation, fan-out, and per-user listing.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use propshop_core::error::AppError;
use propshop_core::result::AppResult;
use propshop_database::store::{
    CatalogStore, NotificationStore, OrderStore, PropRequestStore, UserStore,
};
use propshop_entity::notification::{
    NewNotification, Notification, NotificationSeverity, RelatedEntity,
};
use propshop_entity::order::Order;
use propshop_entity::prop_request::PropRequest;
use propshop_entity::user::{User, UserSummary};

use super::messages;
use crate::context::RequestContext;

/// Hydrated summary of the entity a notification points at.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "model")]
pub enum RelatedSummary {
    /// An order with the names of its props.
    Order {
        /// Order id.
        id: Uuid,
        /// Prop names in line order; `Unknown Prop` for deleted props.
        prop_names: Vec<String>,
    },
    /// A prop request.
    PropRequest {
        /// Request id.
        id: Uuid,
        /// Requested prop name.
        prop_name: String,
    },
}

/// A notification as shown to its recipient.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
    /// The stored notification.
    #[serde(flatten)]
    pub notification: Notification,
    /// Related entity, if it still exists.
    pub related: Option<RelatedSummary>,
}

/// A notification as shown in the admin feed.
#[derive(Debug, Clone, Serialize)]
pub struct AdminNotificationView {
    /// The stored notification.
    #[serde(flatten)]
    pub notification: Notification,
    /// Recipient details.
    pub recipient: Option<UserSummary>,
}

/// Manages the notification outbox.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
    users: Arc<dyn UserStore>,
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
    prop_requests: Arc<dyn PropRequestStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        users: Arc<dyn UserStore>,
        catalog: Arc<dyn CatalogStore>,
        orders: Arc<dyn OrderStore>,
        prop_requests: Arc<dyn PropRequestStore>,
    ) -> Self {
        Self {
            notifications,
            users,
            catalog,
            orders,
            prop_requests,
        }
    }

    /// Creates a notification.
    pub async fn create(&self, notification: NewNotification) -> AppResult<Notification> {
        self.notifications.create(notification).await
    }

    /// Creates a notification, logging instead of failing.
    async fn notify(&self, notification: NewNotification) {
        let user_id = notification.user_id;
        if let Err(e) = self.notifications.create(notification).await {
            error!(user_id = %user_id, error = %e, "Failed to create notification");
        }
    }

    /// Sends a warning notification to every administrator.
    async fn notify_admins(
        &self,
        message: &str,
        related_id: Uuid,
        related_model: RelatedEntity,
    ) -> usize {
        let admins = match self.users.list_admins().await {
            Ok(admins) => admins,
            Err(e) => {
                error!(error = %e, "Failed to resolve administrators for notification");
                return 0;
            }
        };

        for admin in &admins {
            self.notify(NewNotification {
                user_id: admin.id,
                message: message.to_string(),
                severity: NotificationSeverity::Warning,
                related_id: Some(related_id),
                related_model: Some(related_model),
            })
            .await;
        }
        admins.len()
    }

    /// Name of the first prop in an order, or `Unknown Prop`.
    async fn first_prop_name(&self, order: &Order) -> String {
        let Some(first) = order.lines().first() else {
            return messages::UNKNOWN_PROP.to_string();
        };
        match self.catalog.find_prop(first.prop_id).await {
            Ok(Some(prop)) => prop.name,
            Ok(None) => messages::UNKNOWN_PROP.to_string(),
            Err(e) => {
                warn!(prop_id = %first.prop_id, error = %e, "Failed to resolve prop name");
                messages::UNKNOWN_PROP.to_string()
            }
        }
    }

    /// Notifies the customer (success) and every admin (warning) about a
    /// newly placed order. Failures are logged and never propagate.
    pub async fn notify_order_placed(&self, order: &Order) {
        let first = self.first_prop_name(order).await;
        let count = order.lines().len();

        self.notify(NewNotification::for_order(
            order.user_id,
            order.id,
            messages::order_placed_customer(&first, count),
            NotificationSeverity::Success,
        ))
        .await;

        let admins = self
            .notify_admins(
                &messages::order_placed_admin(&first, count),
                order.id,
                RelatedEntity::Order,
            )
            .await;

        info!(order_id = %order.id, admins, "Order notifications sent");
    }

    /// Notifies the requester (info) and every admin (warning) about a new
    /// prop request.
    pub async fn notify_prop_request_submitted(
        &self,
        request: &PropRequest,
        requester: Option<&User>,
    ) {
        self.notify(NewNotification::for_prop_request(
            request.user_id,
            request.id,
            messages::request_submitted_requester(&request.prop_name),
            NotificationSeverity::Info,
        ))
        .await;

        let requester_name = requester
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "a user".to_string());
        self.notify_admins(
            &messages::request_submitted_admin(&request.prop_name, &requester_name),
            request.id,
            RelatedEntity::PropRequest,
        )
        .await;
    }

    /// Notifies the requester about a status change.
    pub async fn notify_prop_request_status(&self, request: &PropRequest) {
        let severity = if request.status.is_positive() {
            NotificationSeverity::Success
        } else {
            NotificationSeverity::Error
        };
        self.notify(NewNotification::for_prop_request(
            request.user_id,
            request.id,
            messages::request_status_changed(&request.prop_name, request.status),
            severity,
        ))
        .await;
    }

    /// Lists a user's notifications, newest first, with related entities.
    pub async fn list_for_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> AppResult<Vec<NotificationView>> {
        ctx.require_self_or_admin(user_id)?;

        let notifications = self.notifications.list_for_user(user_id).await?;
        let mut views = Vec::with_capacity(notifications.len());
        for notification in notifications {
            let related = self.hydrate(&notification).await?;
            views.push(NotificationView {
                notification,
                related,
            });
        }
        Ok(views)
    }

    async fn hydrate(&self, notification: &Notification) -> AppResult<Option<RelatedSummary>> {
        let (Some(id), Some(model)) = (notification.related_id, notification.related_model) else {
            return Ok(None);
        };

        match model {
            RelatedEntity::Order => {
                let Some(order) = self.orders.find_by_id(id).await? else {
                    return Ok(None);
                };
                let ids: Vec<Uuid> = order.lines().iter().map(|l| l.prop_id).collect();
                let names: HashMap<Uuid, String> = self
                    .catalog
                    .find_props(&ids)
                    .await?
                    .into_iter()
                    .map(|p| (p.id, p.name))
                    .collect();
                let prop_names = ids
                    .iter()
                    .map(|id| {
                        names
                            .get(id)
                            .cloned()
                            .unwrap_or_else(|| messages::UNKNOWN_PROP.to_string())
                    })
                    .collect();
                Ok(Some(RelatedSummary::Order { id, prop_names }))
            }
            RelatedEntity::PropRequest => Ok(self
                .prop_requests
                .find_by_id(id)
                .await?
                .map(|r| RelatedSummary::PropRequest {
                    id,
                    prop_name: r.prop_name,
                })),
        }
    }

    /// Marks one of the caller's notifications read.
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Notification> {
        self.notifications
            .mark_read(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Marks all of the caller's notifications read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        let count = self.notifications.mark_all_read(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, count, "Marked notifications read");
        Ok(count)
    }

    /// Admin feed: warning notifications across all users, newest first.
    pub async fn list_for_admins(
        &self,
        ctx: &RequestContext,
    ) -> AppResult<Vec<AdminNotificationView>> {
        ctx.require_admin()?;

        let notifications = self
            .notifications
            .list_by_severity(NotificationSeverity::Warning)
            .await?;

        let mut recipient_ids: Vec<Uuid> = notifications.iter().map(|n| n.user_id).collect();
        recipient_ids.sort();
        recipient_ids.dedup();
        let recipients: HashMap<Uuid, UserSummary> = self
            .users
            .find_by_ids(&recipient_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.summary()))
            .collect();

        Ok(notifications
            .into_iter()
            .map(|notification| AdminNotificationView {
                recipient: recipients.get(&notification.user_id).cloned(),
                notification,
            })
            .collect())
    }
}
