//! Shared application state.

use orchestrator::{
    BroadcastConfirmationPublisher, InMemoryCustomerRegistry, InMemoryPaymentGateway,
    InMemoryProductCatalog, OrderOrchestrator,
};
use order_store::OrderStore;

/// The orchestrator wired to the in-process collaborators.
pub type Orchestrator<S> = OrderOrchestrator<
    S,
    InMemoryCustomerRegistry,
    InMemoryProductCatalog,
    InMemoryPaymentGateway,
    BroadcastConfirmationPublisher,
>;

/// Shared application state accessible from all handlers.
///
/// The collaborator handles share their state with the orchestrator's
/// copies, so seeding a customer here makes it visible to order creation.
pub struct AppState<S: OrderStore> {
    pub orchestrator: Orchestrator<S>,
    pub customers: InMemoryCustomerRegistry,
    pub catalog: InMemoryProductCatalog,
    pub payments: InMemoryPaymentGateway,
    pub confirmations: BroadcastConfirmationPublisher,
}
