//! Prop request submission and admin review.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use propshop_core::error::AppError;
use propshop_core::result::AppResult;
use propshop_database::store::{PropRequestStore, UserStore};
use propshop_entity::prop_request::{
    CreatePropRequest, PropRequest, RequestReason, RequestStatus, Urgency,
};
use propshop_entity::user::UserSummary;

use crate::context::RequestContext;
use crate::notification::NotificationService;

/// A user's prop request as submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPropRequest {
    /// Requesting user; must be the caller.
    pub user_id: Uuid,
    /// Requested prop name.
    pub prop_name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Defaults to normal.
    pub urgency: Option<Urgency>,
    /// Defaults to not-in-system.
    pub reason: Option<RequestReason>,
    /// Extra details.
    pub additional_info: Option<String>,
}

/// A request with its requester, for administrators.
#[derive(Debug, Clone, Serialize)]
pub struct PropRequestView {
    /// The request.
    #[serde(flatten)]
    pub request: PropRequest,
    /// Requester, unless the account is gone.
    pub requester: Option<UserSummary>,
}

/// Prop request workflow.
#[derive(Debug, Clone)]
pub struct PropRequestService {
    requests: Arc<dyn PropRequestStore>,
    users: Arc<dyn UserStore>,
    notifications: Arc<NotificationService>,
}

impl PropRequestService {
    /// Creates a new prop request service.
    pub fn new(
        requests: Arc<dyn PropRequestStore>,
        users: Arc<dyn UserStore>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            requests,
            users,
            notifications,
        }
    }

    /// Records a request and notifies the requester and admins.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        req: SubmitPropRequest,
    ) -> AppResult<PropRequest> {
        ctx.require_self_or_admin(req.user_id)?;

        let prop_name = req.prop_name.trim();
        if prop_name.is_empty() {
            return Err(AppError::validation("Prop name is required"));
        }

        let requester = self
            .users
            .find_by_id(req.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let request = self
            .requests
            .create(CreatePropRequest {
                user_id: req.user_id,
                prop_name: prop_name.to_string(),
                description: req.description,
                urgency: req.urgency.unwrap_or_default(),
                reason: req.reason.unwrap_or_default(),
                additional_info: req.additional_info,
            })
            .await?;

        info!(
            request_id = %request.id,
            user_id = %request.user_id,
            prop_name = %request.prop_name,
            "Prop request submitted"
        );
        self.notifications
            .notify_prop_request_submitted(&request, Some(&requester))
            .await;
        Ok(request)
    }

    /// Number of requests awaiting review.
    pub async fn pending_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        ctx.require_admin()?;
        self.requests.count_by_status(RequestStatus::Pending).await
    }

    /// Every request, newest first, with requester details.
    pub async fn list_all(&self, ctx: &RequestContext) -> AppResult<Vec<PropRequestView>> {
        ctx.require_admin()?;

        let requests = self.requests.list_all().await?;
        let mut ids: Vec<Uuid> = requests.iter().map(|r| r.user_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let users: HashMap<Uuid, UserSummary> = self
            .users
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.summary()))
            .collect();

        Ok(requests
            .into_iter()
            .map(|request| PropRequestView {
                requester: users.get(&request.user_id).cloned(),
                request,
            })
            .collect())
    }

    /// Sets a request's status and tells the requester.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: RequestStatus,
    ) -> AppResult<PropRequest> {
        ctx.require_admin()?;

        let request = self
            .requests
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::not_found("Prop request not found"))?;

        info!(
            request_id = %id,
            status = %status,
            admin = %ctx.username,
            "Prop request status updated"
        );
        self.notifications.notify_prop_request_status(&request).await;
        Ok(request)
    }
}
