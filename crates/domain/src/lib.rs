//! Data model for the order placement workflow.
//!
//! This crate holds the values that flow through an order creation:
//! - the inbound [`OrderRequest`] and its purchase items
//! - the persisted [`Order`] and [`OrderLine`] entities
//! - the payloads exchanged with collaborators ([`Customer`],
//!   [`PurchasedProduct`], [`PaymentRequest`], [`OrderConfirmation`])

pub mod confirmation;
pub mod customer;
pub mod error;
pub mod order;
pub mod payment;
pub mod product;

pub use common::{CustomerId, OrderId, OrderLineId, ProductId};
pub use confirmation::OrderConfirmation;
pub use customer::Customer;
pub use error::ValidationError;
pub use order::{
    Money, NewOrder, Order, OrderLine, OrderLineRequest, OrderRequest, OrderSummary,
    PaymentMethod, PurchaseItem, UnknownPaymentMethod,
};
pub use payment::PaymentRequest;
pub use product::PurchasedProduct;
