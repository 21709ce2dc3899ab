//! Notification domain entities.

pub mod model;
pub mod severity;

pub use model::{NewNotification, Notification};
pub use severity::{NotificationSeverity, RelatedEntity};
