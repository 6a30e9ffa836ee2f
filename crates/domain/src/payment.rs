//! Payment request sent to the payment processor.

use common::OrderId;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::order::{Money, Order, OrderRequest, PaymentMethod};

/// A request to charge the customer for a persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub order_id: OrderId,
    pub order_reference: String,
    pub customer: Customer,
}

impl PaymentRequest {
    /// Builds the payment request for an order that has already been saved,
    /// so the order id is always a real one.
    pub fn for_order(order: &Order, request: &OrderRequest, customer: Customer) -> Self {
        Self {
            amount: request.amount,
            payment_method: request.payment_method,
            order_id: order.id,
            order_reference: order.reference.clone(),
            customer,
        }
    }
}
