//! Ports for the remote collaborators of the order workflow, with in-memory
//! implementations.

pub mod customer;
pub mod notification;
pub mod payment;
pub mod product;

pub use customer::{CustomerLookup, InMemoryCustomerRegistry};
pub use notification::{
    BroadcastConfirmationPublisher, ConfirmationPublisher, InMemoryConfirmationPublisher,
};
pub use payment::{InMemoryPaymentGateway, PaymentAcknowledgement, PaymentRequester};
pub use product::{CatalogProduct, InMemoryProductCatalog, ProductPurchase};
