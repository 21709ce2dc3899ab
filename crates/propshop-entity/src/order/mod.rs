//! Order ledger entities.

pub mod line;
pub mod model;
pub mod status;

pub use line::{FulfillmentType, OrderLine};
pub use model::{NewOrder, Order};
pub use status::{OrderStatus, PaymentMethod, PaymentStatus};
