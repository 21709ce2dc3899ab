//! Payment gateway trait for hosted checkout providers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// One priced line on a hosted checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayLineItem {
    /// Display name.
    pub name: String,
    /// Unit amount in the currency's minor unit (e.g. paisa, cents).
    pub unit_amount: i64,
    /// Number of units.
    pub quantity: i64,
}

/// Parameters for creating a hosted checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    /// Lines shown to the payer.
    pub line_items: Vec<GatewayLineItem>,
    /// Lowercase ISO currency code.
    pub currency: String,
    /// Redirect after payment.
    pub success_url: String,
    /// Redirect on cancel.
    pub cancel_url: String,
    /// Opaque key/value pairs echoed back on the session and its webhook.
    pub metadata: BTreeMap<String, String>,
}

/// A hosted checkout session as reported by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider session identity.
    pub id: String,
    /// Hosted page URL (present while the session is open).
    pub url: Option<String>,
    /// Payment intent created for the session, once known.
    pub payment_intent: Option<String>,
    /// Provider payment status (`paid`, `unpaid`, ...).
    pub payment_status: Option<String>,
    /// Metadata attached at creation.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// A payment intent as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider intent identity.
    pub id: String,
    /// Provider status (`succeeded`, `processing`, ...).
    pub status: String,
    /// Amount in minor units.
    pub amount: i64,
    /// Metadata copied from the checkout session.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl PaymentIntent {
    /// Whether the provider has captured the funds.
    pub fn is_succeeded(&self) -> bool {
        self.status == "succeeded"
    }
}

/// Hosted checkout provider.
///
/// The Stripe implementation lives in `propshop-payment`; tests use the
/// mock implementation from the same crate.
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Provider name for logging (e.g. `"stripe"`).
    fn provider_name(&self) -> &str;

    /// Create a hosted checkout session.
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> AppResult<CheckoutSession>;

    /// Retrieve a checkout session by id.
    async fn retrieve_checkout_session(&self, session_id: &str) -> AppResult<CheckoutSession>;

    /// Retrieve a payment intent by id.
    async fn retrieve_payment_intent(&self, intent_id: &str) -> AppResult<PaymentIntent>;
}
