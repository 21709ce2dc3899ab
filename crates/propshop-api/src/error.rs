//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use propshop_core::error::{AppError, ErrorKind};
use propshop_core::types::ApiErrorResponse;

/// HTTP-facing wrapper around [`AppError`].
///
/// Handlers return `Result<_, ApiError>` and use `?` on service calls.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status and machine-readable code for the error kind.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self.0.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::TotalMismatch => (StatusCode::BAD_REQUEST, "TOTAL_MISMATCH"),
            ErrorKind::SignatureInvalid => (StatusCode::BAD_REQUEST, "INVALID_SIGNATURE"),
            ErrorKind::Serialization => (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD"),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::ExternalService => (StatusCode::BAD_GATEWAY, "PAYMENT_PROVIDER_ERROR"),
            ErrorKind::Internal | ErrorKind::Database | ErrorKind::Configuration => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let mut body = ApiErrorResponse::new(error_code, self.0.message.clone());
        if status.is_server_error() {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Server error");
            let detail = self
                .0
                .source
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or(self.0.message);
            body = body.with_details(detail);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::total_mismatch("x"), StatusCode::BAD_REQUEST),
            (AppError::signature_invalid("x"), StatusCode::BAD_REQUEST),
            (AppError::authentication("x"), StatusCode::UNAUTHORIZED),
            (AppError::authorization("x"), StatusCode::FORBIDDEN),
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::external_service("x"), StatusCode::BAD_GATEWAY),
            (AppError::database("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status_and_code().0, status);
        }
    }

    #[test]
    fn test_server_errors_carry_details() {
        let response = ApiError(AppError::internal("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
