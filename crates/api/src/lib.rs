//! HTTP API server for the order placement orchestrator.
//!
//! Provides REST endpoints for creating and reading orders and for
//! inspecting workflow attempts, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod listener;
pub mod routes;
pub mod seed;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestrator::{
    BroadcastConfirmationPublisher, InMemoryCustomerRegistry, InMemoryPaymentGateway,
    InMemoryProductCatalog, OrderOrchestrator, WorkflowJournal,
};
use order_store::OrderStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::{AppState, Orchestrator};

/// Confirmations buffered per subscriber before it starts lagging.
pub const CONFIRMATION_CHANNEL_CAPACITY: usize = 1024;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: OrderStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route(
            "/orders",
            post(routes::orders::create::<S>).get(routes::orders::list::<S>),
        )
        .route("/orders/{id}", get(routes::orders::get::<S>))
        .route("/orders/{id}/lines", get(routes::orders::lines::<S>))
        .route(
            "/workflows/{reference}",
            get(routes::workflows::for_reference::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around `store` with the default workflow
/// journal capacity.
pub fn create_default_state<S: OrderStore + 'static>(store: S) -> Arc<AppState<S>> {
    create_state(store, orchestrator::DEFAULT_JOURNAL_CAPACITY)
}

/// Creates the application state around `store`, with in-process
/// collaborators seeded with the demo customers and products and a workflow
/// journal holding at most `journal_capacity` records.
pub fn create_state<S: OrderStore + 'static>(
    store: S,
    journal_capacity: usize,
) -> Arc<AppState<S>> {
    let customers = InMemoryCustomerRegistry::with_customers(seed::demo_customers());
    let catalog = InMemoryProductCatalog::with_products(seed::demo_products());
    let payments = InMemoryPaymentGateway::new();
    let confirmations = BroadcastConfirmationPublisher::new(CONFIRMATION_CHANNEL_CAPACITY);

    let orchestrator = OrderOrchestrator::new(
        store,
        customers.clone(),
        catalog.clone(),
        payments.clone(),
        confirmations.clone(),
    )
    .with_journal(WorkflowJournal::with_capacity(journal_capacity));

    Arc::new(AppState {
        orchestrator,
        customers,
        catalog,
        payments,
        confirmations,
    })
}
