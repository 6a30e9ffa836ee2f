//! Persisted order entity and its read representation.

use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use serde::{Deserialize, Serialize};

use super::{Money, PaymentMethod};

/// An order that has not been persisted yet.
///
/// The store assigns the identifier and creation timestamp when it saves one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub reference: String,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub customer_id: CustomerId,
}

impl NewOrder {
    /// Attaches the store-assigned identity, producing the persisted order.
    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            reference: self.reference,
            amount: self.amount,
            payment_method: self.payment_method,
            customer_id: self.customer_id,
            created_at,
        }
    }
}

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier assigned by the store.
    pub id: OrderId,

    /// Reference copied from the originating request.
    pub reference: String,

    /// Total amount.
    pub amount: Money,

    /// Payment method.
    pub payment_method: PaymentMethod,

    /// The customer who placed the order.
    pub customer_id: CustomerId,

    /// When the store created the order.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Maps the order to its response shape.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from(self)
    }
}

/// The representation of an order returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub reference: String,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub customer_id: CustomerId,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            reference: order.reference.clone(),
            amount: order.amount,
            payment_method: order.payment_method,
            customer_id: order.customer_id.clone(),
            created_at: order.created_at,
        }
    }
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            reference: order.reference,
            amount: order.amount,
            payment_method: order.payment_method,
            customer_id: order.customer_id,
            created_at: order.created_at,
        }
    }
}
