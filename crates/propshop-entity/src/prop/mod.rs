//! Catalog entities.

pub mod category;
pub mod model;

pub use category::PropCategory;
pub use model::{CreateProp, Prop, UpdateProp};
