//! Order orchestrator: sequences the collaborators that create an order.

use std::pin::Pin;

use common::OrderId;
use domain::{
    OrderConfirmation, OrderLine, OrderLineRequest, OrderRequest, OrderSummary, PaymentRequest,
};
use futures_core::Stream;
use futures_util::{StreamExt, TryStreamExt};
use order_store::OrderStore;

use crate::error::{OrderError, Result};
use crate::services::{ConfirmationPublisher, CustomerLookup, PaymentRequester, ProductPurchase};
use crate::state::WorkflowState;
use crate::steps;
use crate::workflow::{WorkflowJournal, WorkflowRecord};

/// A stream of order summaries read from the order store.
pub type OrderSummaryStream = Pin<Box<dyn Stream<Item = Result<OrderSummary>> + Send>>;

/// Creates orders by driving customer lookup, product purchase, order
/// persistence, payment and confirmation in a fixed order.
///
/// Each call to [`create_order`](Self::create_order) is one sequential chain
/// of awaited calls. Concurrent calls share only the order store. Nothing
/// is compensated: a failure after the order is saved leaves the order in
/// place and the error carries its id.
pub struct OrderOrchestrator<S, C, P, Pay, N>
where
    S: OrderStore,
    C: CustomerLookup,
    P: ProductPurchase,
    Pay: PaymentRequester,
    N: ConfirmationPublisher,
{
    store: S,
    customers: C,
    products: P,
    payments: Pay,
    notifications: N,
    journal: WorkflowJournal,
}

impl<S, C, P, Pay, N> OrderOrchestrator<S, C, P, Pay, N>
where
    S: OrderStore,
    C: CustomerLookup,
    P: ProductPurchase,
    Pay: PaymentRequester,
    N: ConfirmationPublisher,
{
    /// Creates a new orchestrator with an empty workflow journal.
    pub fn new(store: S, customers: C, products: P, payments: Pay, notifications: N) -> Self {
        Self {
            store,
            customers,
            products,
            payments,
            notifications,
            journal: WorkflowJournal::new(),
        }
    }

    /// Replaces the workflow journal, e.g. with one of a different capacity.
    pub fn with_journal(mut self, journal: WorkflowJournal) -> Self {
        self.journal = journal;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn journal(&self) -> &WorkflowJournal {
        &self.journal
    }

    /// Places an order and returns its id.
    ///
    /// Steps, in order: validate the request, resolve the customer, purchase
    /// the products, save the order, save one line per item, request the
    /// payment and publish the confirmation. The first failing step ends the
    /// call. Errors from the last three steps carry the id of the order that
    /// was already saved.
    #[tracing::instrument(
        skip(self, request),
        fields(reference = %request.reference, customer_id = %request.customer_id)
    )]
    pub async fn create_order(&self, request: OrderRequest) -> Result<OrderId> {
        metrics::counter!("orders_create_total").increment(1);
        let started = std::time::Instant::now();

        if let Err(e) = request.validate() {
            let err = OrderError::from(e);
            metrics::counter!("orders_create_failed_total", "step" => err.step()).increment(1);
            tracing::info!(error = %err, "order request rejected");
            return Err(err);
        }

        let mut workflow = WorkflowRecord::start(&request);
        self.journal.record(&workflow).await;

        let result = self.run(&request, &mut workflow).await;

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("order_create_duration_seconds").record(duration);

        match &result {
            Ok(order_id) => {
                metrics::counter!("orders_created_total").increment(1);
                tracing::info!(%order_id, duration, "order created");
            }
            Err(err) => {
                workflow.fail(err.step(), err.to_string());
                metrics::counter!("orders_create_failed_total", "step" => err.step()).increment(1);
                match err.committed_order_id() {
                    Some(order_id) => tracing::warn!(
                        %order_id,
                        step = err.step(),
                        state = %workflow.state(),
                        error = %err,
                        "order saved but not fully processed, needs reconciliation"
                    ),
                    None => tracing::info!(
                        step = err.step(),
                        error = %err,
                        "order creation failed before anything was saved"
                    ),
                }
            }
        }
        self.journal.record(&workflow).await;

        result
    }

    async fn run(&self, request: &OrderRequest, workflow: &mut WorkflowRecord) -> Result<OrderId> {
        // 1. Customer
        tracing::info!(step = steps::STEP_LOOKUP_CUSTOMER, "order step started");
        let customer = self
            .customers
            .find_customer(&request.customer_id)
            .await
            .map_err(OrderError::CustomerLookupFailed)?
            .ok_or_else(|| OrderError::CustomerNotFound(request.customer_id.clone()))?;
        self.advance(workflow, WorkflowState::CustomerResolved).await?;

        // 2. Products, all or nothing
        tracing::info!(step = steps::STEP_PURCHASE_PRODUCTS, "order step started");
        let purchased = self
            .products
            .purchase_products(&request.products)
            .await
            .map_err(OrderError::ProductPurchaseFailed)?;
        self.advance(workflow, WorkflowState::ProductsPurchased).await?;

        // 3. Order row; from here on failures leave the order in place
        tracing::info!(step = steps::STEP_SAVE_ORDER, "order step started");
        let order = self
            .store
            .save_order(request.to_new_order())
            .await
            .map_err(OrderError::OrderPersistenceFailed)?;
        workflow.assign_order(order.id);
        self.advance(workflow, WorkflowState::OrderPersisted).await?;

        // 4. One line per item, in request order
        tracing::info!(
            step = steps::STEP_SAVE_ORDER_LINES,
            order_id = %order.id,
            lines = request.products.len(),
            "order step started"
        );
        for item in &request.products {
            self.store
                .save_order_line(OrderLineRequest::for_item(order.id, item))
                .await
                .map_err(|source| OrderError::OrderLinePersistenceFailed {
                    order_id: order.id,
                    lines_persisted: workflow.lines_persisted(),
                    lines_requested: request.products.len(),
                    source,
                })?;
            workflow.record_line();
            metrics::counter!("order_lines_persisted_total").increment(1);
        }
        self.advance(workflow, WorkflowState::LinesPersisted).await?;

        // 5. Payment
        tracing::info!(
            step = steps::STEP_REQUEST_PAYMENT,
            order_id = %order.id,
            "order step started"
        );
        let payment = PaymentRequest::for_order(&order, request, customer.clone());
        let ack = self
            .payments
            .request_payment(payment)
            .await
            .map_err(|source| OrderError::PaymentRequestFailed {
                order_id: order.id,
                source,
            })?;
        workflow.record_payment(ack.payment_id.as_str());
        tracing::debug!(payment_id = %ack.payment_id, "payment acknowledged");
        self.advance(workflow, WorkflowState::PaymentRequested).await?;

        // 6. Confirmation
        tracing::info!(
            step = steps::STEP_PUBLISH_CONFIRMATION,
            order_id = %order.id,
            "order step started"
        );
        let confirmation = OrderConfirmation::new(request, customer, purchased);
        self.notifications
            .publish_confirmation(confirmation)
            .await
            .map_err(|source| OrderError::ConfirmationPublishFailed {
                order_id: order.id,
                source,
            })?;
        metrics::counter!("order_confirmations_published_total").increment(1);
        self.advance(workflow, WorkflowState::ConfirmationSent).await?;
        self.advance(workflow, WorkflowState::Done).await?;

        Ok(order.id)
    }

    async fn advance(&self, workflow: &mut WorkflowRecord, to: WorkflowState) -> Result<()> {
        workflow.advance(to)?;
        self.journal.record(workflow).await;
        Ok(())
    }

    /// Streams every persisted order as a summary, in store iteration order.
    ///
    /// The stream reads storage when polled; call again to see orders saved
    /// later.
    #[tracing::instrument(skip(self))]
    pub async fn find_all_orders(&self) -> Result<OrderSummaryStream> {
        let orders = self.store.stream_orders().await?;
        Ok(Box::pin(orders.map(|order| {
            order.map(OrderSummary::from).map_err(OrderError::from)
        })))
    }

    /// Collects every persisted order summary.
    pub async fn list_orders(&self) -> Result<Vec<OrderSummary>> {
        self.find_all_orders().await?.try_collect().await
    }

    /// Loads one order summary.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, order_id: OrderId) -> Result<OrderSummary> {
        self.store
            .find_order(order_id)
            .await?
            .map(OrderSummary::from)
            .ok_or(OrderError::OrderNotFound(order_id))
    }

    /// Loads the lines of an order in the order they were requested.
    #[tracing::instrument(skip(self))]
    pub async fn find_order_lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>> {
        if self.store.find_order(order_id).await?.is_none() {
            return Err(OrderError::OrderNotFound(order_id));
        }
        Ok(self.store.find_lines_for_order(order_id).await?)
    }

    /// Returns every creation attempt made with the given reference, oldest
    /// first.
    pub async fn workflows_for_reference(&self, reference: &str) -> Vec<WorkflowRecord> {
        self.journal.for_reference(reference).await
    }
}
