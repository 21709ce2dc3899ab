//! Notification outbox: fan-out, listing, and read state.

pub mod messages;
pub mod service;

pub use service::{AdminNotificationView, NotificationService, NotificationView, RelatedSummary};
