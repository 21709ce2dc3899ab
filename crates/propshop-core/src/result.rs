//! Convenience result type alias for PropShop.

use crate::error::AppError;

/// A specialized `Result` type for PropShop operations.
pub type AppResult<T> = Result<T, AppError>;
