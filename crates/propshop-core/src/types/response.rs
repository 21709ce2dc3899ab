//! Error body shared by every failing API response.

use serde::{Deserialize, Serialize};

/// `{ "success": false, "error": CODE, "message": ... }`, the failure
/// counterpart of the API's success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable code such as `TOTAL_MISMATCH`.
    pub error: String,
    /// Message safe to show to the shopper.
    pub message: String,
    /// Extra context, only attached to server errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorResponse {
    /// Body with a code and message only.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Attach details.
    pub fn with_details(mut self, details: impl Into<serde_json::Value>) -> Self {
        self.details = Some(details.into());
        self
    }
}
