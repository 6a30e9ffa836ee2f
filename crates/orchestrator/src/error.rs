//! Order orchestration error types.

use common::{CustomerId, OrderId};
use domain::ValidationError;
use order_store::StoreError;
use thiserror::Error;

use crate::state::WorkflowState;
use crate::steps;

/// Failure reported by a remote collaborator (customer registry, product
/// catalog, payment processor or notification bus).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The collaborator could not be reached or did not answer.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered and refused the request.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Errors that can occur while creating or reading orders.
///
/// Variants before `OrderPersistenceFailed` happen before anything is
/// written. `OrderLinePersistenceFailed`, `PaymentRequestFailed` and
/// `ConfirmationPublishFailed` happen after the order was committed and
/// carry its id.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The request failed its preconditions.
    #[error("Invalid order request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// The customer registry has no such customer.
    #[error("Cannot create order: no customer exists with id {0}")]
    CustomerNotFound(CustomerId),

    /// The customer registry could not answer.
    #[error("Customer lookup failed: {0}")]
    CustomerLookupFailed(#[source] ServiceError),

    /// The catalog rejected one or more items, or could not be reached.
    #[error("Product purchase failed: {0}")]
    ProductPurchaseFailed(#[source] ServiceError),

    /// Writing the order itself failed.
    #[error("Order persistence failed: {0}")]
    OrderPersistenceFailed(#[source] StoreError),

    /// A line write failed after the order was committed.
    #[error(
        "Order {order_id} was saved with {lines_persisted} of {lines_requested} lines: {source}"
    )]
    OrderLinePersistenceFailed {
        order_id: OrderId,
        lines_persisted: usize,
        lines_requested: usize,
        source: StoreError,
    },

    /// The payment request for a committed order failed.
    #[error("Payment request for order {order_id} failed: {source}")]
    PaymentRequestFailed {
        order_id: OrderId,
        source: ServiceError,
    },

    /// The confirmation for a committed order could not be published.
    #[error("Order confirmation for order {order_id} could not be published: {source}")]
    ConfirmationPublishFailed {
        order_id: OrderId,
        source: ServiceError,
    },

    /// No order with the given id exists.
    #[error("No order found with id {0}")]
    OrderNotFound(OrderId),

    /// The order store failed on the read path.
    #[error("Order store error: {0}")]
    Storage(#[from] StoreError),

    /// The workflow tried to move backwards or skip a step.
    #[error("Invalid workflow transition from {from} to {to}")]
    InvalidTransition {
        from: WorkflowState,
        to: WorkflowState,
    },
}

impl OrderError {
    /// Returns the id of the order that was already committed when this
    /// error occurred, if any.
    ///
    /// Such an order is visible through `find_by_id` even though the call
    /// that created it failed.
    pub fn committed_order_id(&self) -> Option<OrderId> {
        match self {
            OrderError::OrderLinePersistenceFailed { order_id, .. }
            | OrderError::PaymentRequestFailed { order_id, .. }
            | OrderError::ConfirmationPublishFailed { order_id, .. } => Some(*order_id),
            _ => None,
        }
    }

    /// Returns the name of the step that produced this error.
    pub fn step(&self) -> &'static str {
        match self {
            OrderError::InvalidRequest(_) => steps::STEP_VALIDATE_REQUEST,
            OrderError::CustomerNotFound(_) | OrderError::CustomerLookupFailed(_) => {
                steps::STEP_LOOKUP_CUSTOMER
            }
            OrderError::ProductPurchaseFailed(_) => steps::STEP_PURCHASE_PRODUCTS,
            OrderError::OrderPersistenceFailed(_) => steps::STEP_SAVE_ORDER,
            OrderError::OrderLinePersistenceFailed { .. } => steps::STEP_SAVE_ORDER_LINES,
            OrderError::PaymentRequestFailed { .. } => steps::STEP_REQUEST_PAYMENT,
            OrderError::ConfirmationPublishFailed { .. } => steps::STEP_PUBLISH_CONFIRMATION,
            OrderError::OrderNotFound(_) | OrderError::Storage(_) => steps::STEP_READ_ORDERS,
            OrderError::InvalidTransition { to, .. } => to.step_name(),
        }
    }
}

/// Convenience type alias for orchestrator results.
pub type Result<T> = std::result::Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_committed_order_id_only_after_commit() {
        let order_id = OrderId::new(12);

        assert_eq!(
            OrderError::CustomerNotFound(CustomerId::new("999")).committed_order_id(),
            None
        );
        assert_eq!(
            OrderError::OrderPersistenceFailed(StoreError::Unavailable("down".into()))
                .committed_order_id(),
            None
        );
        assert_eq!(
            OrderError::OrderLinePersistenceFailed {
                order_id,
                lines_persisted: 1,
                lines_requested: 2,
                source: StoreError::Unavailable("down".into()),
            }
            .committed_order_id(),
            Some(order_id)
        );
        assert_eq!(
            OrderError::PaymentRequestFailed {
                order_id,
                source: ServiceError::Unavailable("timeout".into()),
            }
            .committed_order_id(),
            Some(order_id)
        );
        assert_eq!(
            OrderError::ConfirmationPublishFailed {
                order_id,
                source: ServiceError::Unavailable("no subscribers".into()),
            }
            .committed_order_id(),
            Some(order_id)
        );
    }

    #[test]
    fn test_step_names() {
        assert_eq!(
            OrderError::CustomerNotFound(CustomerId::new("1")).step(),
            "lookup_customer"
        );
        assert_eq!(
            OrderError::ProductPurchaseFailed(ServiceError::Rejected("x".into())).step(),
            "purchase_products"
        );
        assert_eq!(
            OrderError::InvalidRequest(ValidationError::NoProducts).step(),
            "validate_request"
        );
    }

    #[test]
    fn test_line_failure_message_names_order() {
        let err = OrderError::OrderLinePersistenceFailed {
            order_id: OrderId::new(4),
            lines_persisted: 1,
            lines_requested: 3,
            source: StoreError::Unavailable("disk full".into()),
        };
        assert_eq!(
            err.to_string(),
            "Order 4 was saved with 1 of 3 lines: Store unavailable: disk full"
        );
    }
}
