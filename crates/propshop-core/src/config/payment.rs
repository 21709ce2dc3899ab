//! Payment provider configuration.

use serde::{Deserialize, Serialize};

/// Stripe Checkout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Whether online payments are enabled at all.
    #[serde(default)]
    pub enabled: bool,
    /// Base URL of the provider REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Secret API key (`sk_...`).
    #[serde(default)]
    pub secret_key: String,
    /// Webhook endpoint signing secret (`whsec_...`).
    #[serde(default)]
    pub webhook_secret: String,
    /// Maximum accepted age of a webhook signature timestamp, in seconds.
    #[serde(default = "default_tolerance")]
    pub webhook_tolerance_seconds: i64,
    /// ISO currency code for checkout sessions.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Redirect target after a successful payment.
    #[serde(default = "default_success_url")]
    pub success_url: String,
    /// Redirect target after a cancelled payment.
    #[serde(default = "default_cancel_url")]
    pub cancel_url: String,
    /// Outbound HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base: default_api_base(),
            secret_key: String::new(),
            webhook_secret: String::new(),
            webhook_tolerance_seconds: default_tolerance(),
            currency: default_currency(),
            success_url: default_success_url(),
            cancel_url: default_cancel_url(),
            request_timeout_seconds: default_timeout(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.stripe.com/v1".to_string()
}

fn default_tolerance() -> i64 {
    300
}

fn default_currency() -> String {
    "npr".to_string()
}

fn default_success_url() -> String {
    "http://localhost:5173/payment-success?session_id={CHECKOUT_SESSION_ID}".to_string()
}

fn default_cancel_url() -> String {
    "http://localhost:5173/cart".to_string()
}

fn default_timeout() -> u64 {
    15
}
