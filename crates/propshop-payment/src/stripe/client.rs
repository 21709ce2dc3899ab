//! Stripe REST client implementing [`PaymentGateway`].

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use propshop_core::config::PaymentConfig;
use propshop_core::error::{AppError, ErrorKind};
use propshop_core::result::AppResult;
use propshop_core::traits::{
    CheckoutSession, CheckoutSessionRequest, PaymentGateway, PaymentIntent,
};

use super::form::checkout_session_form;

/// Stripe Checkout gateway using form-encoded REST calls with basic auth.
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl std::fmt::Debug for StripeGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeGateway")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl StripeGateway {
    /// Create a gateway from payment configuration.
    pub fn new(config: &PaymentConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    /// Decode a Stripe response, turning error envelopes into `AppError`s.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        operation: &str,
    ) -> AppResult<T> {
        let status = response.status();
        let body: serde_json::Value = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Stripe {operation}: unreadable response"),
                e,
            )
        })?;

        if !status.is_success() {
            let message = body["error"]["message"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string();
            error!(operation, %status, message, "Stripe request failed");
            return Err(if status == reqwest::StatusCode::NOT_FOUND {
                AppError::not_found(format!("Stripe {operation}: {message}"))
            } else {
                AppError::external_service(format!("Stripe {operation} failed: {message}"))
            });
        }

        serde_json::from_value(body).map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Stripe {operation}: unexpected response shape"),
                e,
            )
        })
    }

    fn transport_error(operation: &str, e: reqwest::Error) -> AppError {
        AppError::with_source(
            ErrorKind::ExternalService,
            format!("Stripe {operation}: request failed"),
            e,
        )
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    fn provider_name(&self) -> &str {
        "stripe"
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> AppResult<CheckoutSession> {
        debug!(
            lines = request.line_items.len(),
            currency = %request.currency,
            "Creating Stripe checkout session"
        );

        let response = self
            .client
            .post(self.url("checkout/sessions"))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&checkout_session_form(request))
            .send()
            .await
            .map_err(|e| Self::transport_error("create checkout session", e))?;

        Self::decode(response, "create checkout session").await
    }

    async fn retrieve_checkout_session(&self, session_id: &str) -> AppResult<CheckoutSession> {
        let response = self
            .client
            .get(self.url(&format!("checkout/sessions/{session_id}")))
            .basic_auth(&self.secret_key, None::<&str>)
            .send()
            .await
            .map_err(|e| Self::transport_error("retrieve checkout session", e))?;

        Self::decode(response, "retrieve checkout session").await
    }

    async fn retrieve_payment_intent(&self, intent_id: &str) -> AppResult<PaymentIntent> {
        let response = self
            .client
            .get(self.url(&format!("payment_intents/{intent_id}")))
            .basic_auth(&self.secret_key, None::<&str>)
            .send()
            .await
            .map_err(|e| Self::transport_error("retrieve payment intent", e))?;

        Self::decode(response, "retrieve payment intent").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = PaymentConfig {
            api_base: "https://api.stripe.com/v1/".to_string(),
            ..PaymentConfig::default()
        };
        let gateway = StripeGateway::new(&config).unwrap();
        assert_eq!(
            gateway.url("checkout/sessions"),
            "https://api.stripe.com/v1/checkout/sessions"
        );
        assert_eq!(gateway.provider_name(), "stripe");
    }
}
