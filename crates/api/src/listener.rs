//! Background consumer of the order confirmation bus.

use domain::OrderConfirmation;
use tokio::sync::broadcast::{self, error::RecvError};

/// Logs every confirmation until the channel closes.
pub async fn log_confirmations(mut receiver: broadcast::Receiver<OrderConfirmation>) {
    loop {
        match receiver.recv().await {
            Ok(confirmation) => {
                tracing::info!(
                    reference = %confirmation.order_reference,
                    customer_id = %confirmation.customer.id,
                    email = %confirmation.customer.email,
                    total = %confirmation.total_amount,
                    products = confirmation.products.len(),
                    "order confirmation received"
                );
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "confirmation listener lagged behind");
            }
            Err(RecvError::Closed) => {
                tracing::info!("confirmation channel closed");
                break;
            }
        }
    }
}
