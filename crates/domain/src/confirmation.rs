//! Order confirmation event published to the notification bus.

use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::order::{Money, OrderRequest, PaymentMethod};
use crate::product::PurchasedProduct;

/// Event announcing that an order was placed.
///
/// It carries the client reference but not the order id; subscribers that
/// need the persisted order have to match on the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_reference: String,
    pub total_amount: Money,
    pub payment_method: PaymentMethod,
    pub customer: Customer,
    pub products: Vec<PurchasedProduct>,
}

impl OrderConfirmation {
    /// Builds the confirmation from the original request, the resolved
    /// customer and the priced items returned by the catalog.
    pub fn new(
        request: &OrderRequest,
        customer: Customer,
        products: Vec<PurchasedProduct>,
    ) -> Self {
        Self {
            order_reference: request.reference.clone(),
            total_amount: request.amount,
            payment_method: request.payment_method,
            customer,
            products,
        }
    }
}
