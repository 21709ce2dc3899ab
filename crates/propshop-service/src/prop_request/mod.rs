//! Requests for props the shop does not yet carry.

pub mod service;

pub use service::{PropRequestService, PropRequestView, SubmitPropRequest};
