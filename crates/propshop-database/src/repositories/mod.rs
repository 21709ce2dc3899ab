//! PostgreSQL repository implementations of the store traits.

pub mod cart;
pub mod notification;
pub mod order;
pub mod prop;
pub mod prop_request;
pub mod user;

pub use cart::CartRepository;
pub use notification::NotificationRepository;
pub use order::OrderRepository;
pub use prop::PropRepository;
pub use prop_request::PropRequestRepository;
pub use user::UserRepository;
