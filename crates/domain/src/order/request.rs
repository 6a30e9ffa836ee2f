//! Inbound order request.

use common::{CustomerId, ProductId};
use serde::{Deserialize, Serialize};

use super::{Money, NewOrder, PaymentMethod};
use crate::error::ValidationError;

/// One (product, quantity) pair within an order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseItem {
    /// The product to purchase.
    pub product_id: ProductId,

    /// Quantity requested.
    pub quantity: u32,
}

impl PurchaseItem {
    /// Creates a new purchase item.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A request to place an order.
///
/// Constructed once per call and never modified; the orchestrator reads from
/// it at several steps (order mapping, line persistence, payment and
/// confirmation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Client-supplied reference, copied onto the order.
    pub reference: String,

    /// Total amount to charge.
    pub amount: Money,

    /// How the customer pays.
    pub payment_method: PaymentMethod,

    /// The customer placing the order.
    pub customer_id: CustomerId,

    /// Items to purchase, in the order the client listed them.
    pub products: Vec<PurchaseItem>,
}

impl OrderRequest {
    /// Creates a new order request.
    pub fn new(
        reference: impl Into<String>,
        amount: Money,
        payment_method: PaymentMethod,
        customer_id: impl Into<CustomerId>,
        products: Vec<PurchaseItem>,
    ) -> Self {
        Self {
            reference: reference.into(),
            amount,
            payment_method,
            customer_id: customer_id.into(),
            products,
        }
    }

    /// Checks the request preconditions.
    ///
    /// A valid request names a customer, purchases at least one product, has
    /// a positive quantity on every item and a positive amount.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.customer_id.is_blank() {
            return Err(ValidationError::CustomerIdRequired);
        }

        if self.products.is_empty() {
            return Err(ValidationError::NoProducts);
        }

        if let Some(item) = self.products.iter().find(|item| item.quantity == 0) {
            return Err(ValidationError::InvalidQuantity {
                product_id: item.product_id,
            });
        }

        if !self.amount.is_positive() {
            return Err(ValidationError::InvalidAmount {
                amount: self.amount.to_string(),
            });
        }

        Ok(())
    }

    /// Maps the request onto the order to persist.
    pub fn to_new_order(&self) -> NewOrder {
        NewOrder {
            reference: self.reference.clone(),
            amount: self.amount,
            payment_method: self.payment_method,
            customer_id: self.customer_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> OrderRequest {
        OrderRequest::new(
            "ORD-1",
            Money::from_units(150),
            PaymentMethod::Card,
            "7",
            vec![PurchaseItem::new(101, 2), PurchaseItem::new(102, 1)],
        )
    }

    #[test]
    fn test_valid_request_passes() {
        assert_eq!(valid_request().validate(), Ok(()));
    }

    #[test]
    fn test_blank_customer_rejected() {
        let mut request = valid_request();
        request.customer_id = CustomerId::new("  ");
        assert_eq!(request.validate(), Err(ValidationError::CustomerIdRequired));
    }

    #[test]
    fn test_empty_products_rejected() {
        let mut request = valid_request();
        request.products.clear();
        assert_eq!(request.validate(), Err(ValidationError::NoProducts));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut request = valid_request();
        request.products.push(PurchaseItem::new(103, 0));
        assert_eq!(
            request.validate(),
            Err(ValidationError::InvalidQuantity {
                product_id: ProductId::new(103)
            })
        );
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let mut request = valid_request();
        request.amount = Money::zero();
        assert!(matches!(
            request.validate(),
            Err(ValidationError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_to_new_order_copies_fields() {
        let request = valid_request();
        let order = request.to_new_order();

        assert_eq!(order.reference, "ORD-1");
        assert_eq!(order.amount, Money::from_units(150));
        assert_eq!(order.payment_method, PaymentMethod::Card);
        assert_eq!(order.customer_id, CustomerId::new("7"));
    }

    #[test]
    fn test_deserializes_from_json() {
        let json = serde_json::json!({
            "reference": "ORD-1",
            "amount": 150.00,
            "payment_method": "CARD",
            "customer_id": "7",
            "products": [
                { "product_id": 101, "quantity": 2 },
                { "product_id": 102, "quantity": 1 }
            ]
        });

        let request: OrderRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request, valid_request());
    }
}
