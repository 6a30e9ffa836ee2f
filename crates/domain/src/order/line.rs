//! Order line types.

use common::{OrderId, OrderLineId, ProductId};
use serde::{Deserialize, Serialize};

use super::PurchaseItem;

/// A request to persist one line of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderLineRequest {
    /// Builds the line for a purchase item of an already persisted order.
    pub fn for_item(order_id: OrderId, item: &PurchaseItem) -> Self {
        Self {
            order_id,
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}

/// A persisted order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Identifier assigned by the store.
    pub id: OrderLineId,

    /// The order this line belongs to.
    pub order_id: OrderId,

    pub product_id: ProductId,

    pub quantity: u32,
}
