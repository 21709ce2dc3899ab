//! In-process payment gateway for tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use propshop_core::error::AppError;
use propshop_core::result::AppResult;
use propshop_core::traits::{
    CheckoutSession, CheckoutSessionRequest, PaymentGateway, PaymentIntent,
};

/// Records created sessions and serves preset payment intents.
#[derive(Debug, Default)]
pub struct MockPaymentGateway {
    sessions: Mutex<HashMap<String, CheckoutSession>>,
    requests: Mutex<Vec<CheckoutSessionRequest>>,
    intents: Mutex<HashMap<String, PaymentIntent>>,
    counter: AtomicU64,
}

impl MockPaymentGateway {
    /// Create an empty mock gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payment intent with the given status and no metadata.
    pub fn add_intent(&self, id: &str, status: &str, amount: i64) {
        self.add_intent_with_metadata(id, status, amount, BTreeMap::new());
    }

    /// Register a payment intent carrying checkout metadata.
    pub fn add_intent_with_metadata(
        &self,
        id: &str,
        status: &str,
        amount: i64,
        metadata: BTreeMap<String, String>,
    ) {
        if let Ok(mut intents) = self.intents.lock() {
            intents.insert(
                id.to_string(),
                PaymentIntent {
                    id: id.to_string(),
                    status: status.to_string(),
                    amount,
                    metadata,
                },
            );
        }
    }

    /// Register a session directly, e.g. one created by another process.
    pub fn add_session(&self, session: CheckoutSession) {
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.insert(session.id.clone(), session);
        }
    }

    /// Requests passed to `create_checkout_session`, in call order.
    pub fn created_requests(&self) -> Vec<CheckoutSessionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> AppResult<CheckoutSession> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("cs_test_{n}");
        let session = CheckoutSession {
            id: id.clone(),
            url: Some(format!("https://checkout.test/pay/{id}")),
            payment_intent: None,
            payment_status: Some("unpaid".to_string()),
            metadata: request.metadata.clone(),
        };

        self.sessions
            .lock()
            .map_err(|_| AppError::internal("mock gateway poisoned"))?
            .insert(id, session.clone());
        self.requests
            .lock()
            .map_err(|_| AppError::internal("mock gateway poisoned"))?
            .push(request.clone());
        Ok(session)
    }

    async fn retrieve_checkout_session(&self, session_id: &str) -> AppResult<CheckoutSession> {
        self.sessions
            .lock()
            .map_err(|_| AppError::internal("mock gateway poisoned"))?
            .get(session_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("No such checkout session: {session_id}")))
    }

    async fn retrieve_payment_intent(&self, intent_id: &str) -> AppResult<PaymentIntent> {
        self.intents
            .lock()
            .map_err(|_| AppError::internal("mock gateway poisoned"))?
            .get(intent_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("No such payment intent: {intent_id}")))
    }
}
