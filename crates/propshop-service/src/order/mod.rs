//! Order queries and administration.

pub mod service;

pub use service::{
    OrderCounts, OrderService, PaymentIntentCheck, RentedProp, RentedProps, UpdateOrderStatus,
};
