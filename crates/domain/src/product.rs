//! Priced items returned by the product catalog.

use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::order::Money;

/// A product the catalog agreed to sell, with its price.
///
/// Not persisted; forwarded into the order confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasedProduct {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price.
    pub price: Money,
    pub quantity: u32,
}
