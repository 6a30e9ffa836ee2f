//! Order creation orchestration.
//!
//! [`OrderOrchestrator`] places an order by calling its collaborators one
//! after another:
//! 1. Resolve the customer
//! 2. Purchase the products (all or nothing)
//! 3. Save the order
//! 4. Save one line per purchased item, in request order
//! 5. Request the payment
//! 6. Publish the order confirmation
//!
//! Nothing is rolled back. A failure after step 3 leaves the order saved
//! and is reported with the order id, and the attempt is kept in the
//! [`WorkflowJournal`] so it can be found and reconciled.

pub mod error;
pub mod orchestrator;
pub mod services;
pub mod state;
pub mod steps;
pub mod workflow;

pub use error::{OrderError, Result, ServiceError};
pub use orchestrator::{OrderOrchestrator, OrderSummaryStream};
pub use services::{
    BroadcastConfirmationPublisher, CatalogProduct, ConfirmationPublisher, CustomerLookup,
    InMemoryConfirmationPublisher, InMemoryCustomerRegistry, InMemoryPaymentGateway,
    InMemoryProductCatalog, PaymentAcknowledgement, PaymentRequester, ProductPurchase,
};
pub use state::WorkflowState;
pub use workflow::{DEFAULT_JOURNAL_CAPACITY, WorkflowFailure, WorkflowJournal, WorkflowRecord};
