//! Domain error types.

use common::ProductId;
use thiserror::Error;

/// Reasons an [`OrderRequest`](crate::OrderRequest) is rejected before any
/// collaborator is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Customer ID is missing or blank.
    #[error("Customer ID is required")]
    CustomerIdRequired,

    /// The request contains no purchase items.
    #[error("At least one product must be purchased")]
    NoProducts,

    /// A purchase item has a zero quantity.
    #[error("Invalid quantity for product {product_id}: must be greater than 0")]
    InvalidQuantity { product_id: ProductId },

    /// The order amount is zero or negative.
    #[error("Invalid amount: {amount} (must be greater than 0)")]
    InvalidAmount { amount: String },
}
