//! Data Transfer Objects for API requests and responses.

pub mod request;
pub mod response;

use validator::Validate;

use propshop_core::error::AppError;

/// Run the derive-generated shape checks on a request body.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))
}
