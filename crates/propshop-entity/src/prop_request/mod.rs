//! Prop request entities.

pub mod model;
pub mod status;

pub use model::{CreatePropRequest, PropRequest};
pub use status::{RequestReason, RequestStatus, Urgency};
