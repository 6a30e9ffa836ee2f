//! Payment processor port and in-memory implementation.

use std::sync::Arc;

use async_trait::async_trait;
use domain::PaymentRequest;
use tokio::sync::RwLock;

use crate::error::ServiceError;

/// Acknowledgement returned by the payment processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentAcknowledgement {
    /// The payment ID assigned by the processor.
    pub payment_id: String,
}

/// Submits payment requests for persisted orders.
#[async_trait]
pub trait PaymentRequester: Send + Sync {
    async fn request_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentAcknowledgement, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    payments: Vec<(String, PaymentRequest)>,
    next_id: u32,
    fail_on_request: bool,
}

/// In-memory payment gateway that records every accepted request.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to reject payment requests.
    pub async fn set_fail_on_request(&self, fail: bool) {
        self.state.write().await.fail_on_request = fail;
    }

    /// Returns the number of accepted payment requests.
    pub async fn payment_count(&self) -> usize {
        self.state.read().await.payments.len()
    }

    /// Returns the accepted payment requests, oldest first.
    pub async fn payments(&self) -> Vec<PaymentRequest> {
        self.state
            .read()
            .await
            .payments
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }
}

#[async_trait]
impl PaymentRequester for InMemoryPaymentGateway {
    async fn request_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentAcknowledgement, ServiceError> {
        let mut state = self.state.write().await;

        if state.fail_on_request {
            return Err(ServiceError::Unavailable(
                "payment processor did not respond".to_string(),
            ));
        }

        state.next_id += 1;
        let payment_id = format!("PAY-{:04}", state.next_id);
        state.payments.push((payment_id.clone(), request));

        Ok(PaymentAcknowledgement { payment_id })
    }
}
