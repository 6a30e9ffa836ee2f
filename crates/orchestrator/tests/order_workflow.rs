//! Integration tests for the order creation workflow.

use common::{CustomerId, OrderId, ProductId};
use domain::{Customer, Money, OrderRequest, PaymentMethod, PurchaseItem, ValidationError};
use futures_util::TryStreamExt;
use order_store::{InMemoryOrderStore, OrderStore, StoreError};
use orchestrator::{
    CatalogProduct, InMemoryConfirmationPublisher, InMemoryCustomerRegistry,
    InMemoryPaymentGateway, InMemoryProductCatalog, OrderError, OrderOrchestrator, ServiceError,
    WorkflowJournal, WorkflowState,
};

type TestOrchestrator = OrderOrchestrator<
    InMemoryOrderStore,
    InMemoryCustomerRegistry,
    InMemoryProductCatalog,
    InMemoryPaymentGateway,
    InMemoryConfirmationPublisher,
>;

struct TestHarness {
    orchestrator: TestOrchestrator,
    store: InMemoryOrderStore,
    customers: InMemoryCustomerRegistry,
    catalog: InMemoryProductCatalog,
    payments: InMemoryPaymentGateway,
    confirmations: InMemoryConfirmationPublisher,
}

impl TestHarness {
    fn new() -> Self {
        let store = InMemoryOrderStore::new();
        let customers = InMemoryCustomerRegistry::with_customers([Customer::new(
            "7",
            "Ada",
            "Lovelace",
            "ada@example.com",
        )]);
        let catalog = InMemoryProductCatalog::with_products([
            CatalogProduct::new(
                101,
                "Keyboard",
                "Mechanical keyboard",
                Money::from_units(50),
                100,
            ),
            CatalogProduct::new(102, "Mouse", "Wireless mouse", Money::from_units(50), 100),
            CatalogProduct::new(103, "Monitor", "27 inch monitor", Money::from_units(300), 100),
        ]);
        let payments = InMemoryPaymentGateway::new();
        let confirmations = InMemoryConfirmationPublisher::new();

        let orchestrator = OrderOrchestrator::new(
            store.clone(),
            customers.clone(),
            catalog.clone(),
            payments.clone(),
            confirmations.clone(),
        );

        Self {
            orchestrator,
            store,
            customers,
            catalog,
            payments,
            confirmations,
        }
    }
}

fn ord_1() -> OrderRequest {
    OrderRequest::new(
        "ORD-1",
        Money::from_units(150),
        PaymentMethod::Card,
        "7",
        vec![PurchaseItem::new(101, 2), PurchaseItem::new(102, 1)],
    )
}

#[tokio::test]
async fn test_happy_path_scenario() {
    let h = TestHarness::new();

    let order_id = h.orchestrator.create_order(ord_1()).await.unwrap();

    let summary = h.orchestrator.find_by_id(order_id).await.unwrap();
    assert_eq!(summary.id, order_id);
    assert_eq!(summary.reference, "ORD-1");
    assert_eq!(summary.amount, Money::from_units(150));
    assert_eq!(summary.payment_method, PaymentMethod::Card);
    assert_eq!(summary.customer_id, CustomerId::new("7"));

    let lines = h.orchestrator.find_order_lines(order_id).await.unwrap();
    let pairs: Vec<_> = lines
        .iter()
        .map(|l| (l.product_id.as_i64(), l.quantity))
        .collect();
    assert_eq!(pairs, vec![(101, 2), (102, 1)]);
    assert!(lines.iter().all(|l| l.order_id == order_id));
}

#[tokio::test]
async fn test_success_creates_exactly_one_order() {
    let h = TestHarness::new();

    h.orchestrator.create_order(ord_1()).await.unwrap();

    assert_eq!(h.store.order_count().await, 1);
    assert_eq!(h.store.line_count().await, 2);
    assert_eq!(h.payments.payment_count().await, 1);
    assert_eq!(h.confirmations.published_count().await, 1);
}

#[tokio::test]
async fn test_payment_request_uses_persisted_order() {
    let h = TestHarness::new();

    let order_id = h.orchestrator.create_order(ord_1()).await.unwrap();

    let payments = h.payments.payments().await;
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].order_id, order_id);
    assert_eq!(payments[0].order_reference, "ORD-1");
    assert_eq!(payments[0].amount, Money::from_units(150));
    assert_eq!(payments[0].payment_method, PaymentMethod::Card);
    assert_eq!(payments[0].customer.id, CustomerId::new("7"));
}

#[tokio::test]
async fn test_confirmation_carries_priced_products() {
    let h = TestHarness::new();

    h.orchestrator.create_order(ord_1()).await.unwrap();

    let published = h.confirmations.published().await;
    assert_eq!(published.len(), 1);
    let confirmation = &published[0];
    assert_eq!(confirmation.order_reference, "ORD-1");
    assert_eq!(confirmation.total_amount, Money::from_units(150));
    assert_eq!(confirmation.customer.email, "ada@example.com");
    let products: Vec<_> = confirmation
        .products
        .iter()
        .map(|p| (p.product_id.as_i64(), p.name.as_str(), p.quantity))
        .collect();
    assert_eq!(products, vec![(101, "Keyboard", 2), (102, "Mouse", 1)]);
}

#[tokio::test]
async fn test_unknown_customer_persists_nothing() {
    let h = TestHarness::new();
    let before = h.orchestrator.list_orders().await.unwrap();
    let mut request = ord_1();
    request.customer_id = CustomerId::new("999");

    let result = h.orchestrator.create_order(request).await;

    assert!(matches!(result, Err(OrderError::CustomerNotFound(id)) if id.as_str() == "999"));
    assert_eq!(h.orchestrator.list_orders().await.unwrap(), before);
    assert_eq!(h.catalog.purchase_count().await, 0);
    assert_eq!(h.payments.payment_count().await, 0);
    assert_eq!(h.confirmations.published_count().await, 0);
}

#[tokio::test]
async fn test_customer_registry_outage() {
    let h = TestHarness::new();
    h.customers.set_fail_on_lookup(true).await;

    let result = h.orchestrator.create_order(ord_1()).await;

    assert!(matches!(
        result,
        Err(OrderError::CustomerLookupFailed(ServiceError::Unavailable(_)))
    ));
    assert_eq!(h.store.order_count().await, 0);
}

#[tokio::test]
async fn test_product_rejection_creates_no_order() {
    let h = TestHarness::new();
    let request = OrderRequest::new(
        "ORD-555",
        Money::from_units(20),
        PaymentMethod::Card,
        "7",
        vec![PurchaseItem::new(101, 1), PurchaseItem::new(555, 1)],
    );

    let result = h.orchestrator.create_order(request).await;

    assert!(matches!(
        result,
        Err(OrderError::ProductPurchaseFailed(ServiceError::Rejected(_)))
    ));
    let orders = h.orchestrator.list_orders().await.unwrap();
    assert!(orders.iter().all(|o| o.reference != "ORD-555"));
    assert_eq!(h.store.order_count().await, 0);
    assert_eq!(
        h.catalog.available_quantity(ProductId::new(101)).await,
        Some(100)
    );
}

#[tokio::test]
async fn test_order_persistence_failure_leaves_no_order() {
    let h = TestHarness::new();
    h.store.set_fail_on_save_order(true).await;

    let result = h.orchestrator.create_order(ord_1()).await;

    let err = result.unwrap_err();
    assert!(matches!(err, OrderError::OrderPersistenceFailed(_)));
    assert_eq!(err.committed_order_id(), None);
    assert_eq!(h.store.line_count().await, 0);
    assert_eq!(h.payments.payment_count().await, 0);
}

#[tokio::test]
async fn test_line_failure_keeps_order_and_earlier_lines() {
    let h = TestHarness::new();
    h.store.set_fail_on_line(Some(1)).await;

    let result = h.orchestrator.create_order(ord_1()).await;

    let Err(OrderError::OrderLinePersistenceFailed {
        order_id,
        lines_persisted,
        lines_requested,
        source,
    }) = result
    else {
        panic!("expected line persistence failure, got {result:?}");
    };
    assert_eq!(lines_persisted, 1);
    assert_eq!(lines_requested, 2);
    assert!(matches!(source, StoreError::Unavailable(_)));

    let summary = h.orchestrator.find_by_id(order_id).await.unwrap();
    assert_eq!(summary.reference, "ORD-1");
    let lines = h.orchestrator.find_order_lines(order_id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_id, ProductId::new(101));

    assert_eq!(h.payments.payment_count().await, 0);
    assert_eq!(h.confirmations.published_count().await, 0);
}

#[tokio::test]
async fn test_payment_failure_reports_committed_order() {
    let h = TestHarness::new();
    h.payments.set_fail_on_request(true).await;

    let err = h.orchestrator.create_order(ord_1()).await.unwrap_err();

    assert!(matches!(err, OrderError::PaymentRequestFailed { .. }));
    let order_id = err.committed_order_id().unwrap();
    assert!(h.orchestrator.find_by_id(order_id).await.is_ok());
    assert_eq!(
        h.orchestrator.find_order_lines(order_id).await.unwrap().len(),
        2
    );
    assert_eq!(h.confirmations.published_count().await, 0);
}

#[tokio::test]
async fn test_confirmation_failure_reports_committed_order() {
    let h = TestHarness::new();
    h.confirmations.set_fail_on_publish(true).await;

    let err = h.orchestrator.create_order(ord_1()).await.unwrap_err();

    assert!(matches!(err, OrderError::ConfirmationPublishFailed { .. }));
    let order_id = err.committed_order_id().unwrap();
    assert!(h.orchestrator.find_by_id(order_id).await.is_ok());
    assert_eq!(h.payments.payment_count().await, 1);
}

#[tokio::test]
async fn test_partial_failure_is_visible_in_journal() {
    let h = TestHarness::new();
    h.payments.set_fail_on_request(true).await;

    let err = h.orchestrator.create_order(ord_1()).await.unwrap_err();

    let attempts = h.orchestrator.workflows_for_reference("ORD-1").await;
    assert_eq!(attempts.len(), 1);
    let attempt = &attempts[0];
    assert_eq!(attempt.state(), WorkflowState::LinesPersisted);
    assert_eq!(attempt.order_id(), err.committed_order_id());
    assert_eq!(attempt.lines_persisted(), 2);
    assert_eq!(attempt.failure().unwrap().step, "request_payment");
    assert!(attempt.needs_reconciliation());

    let pending = h.orchestrator.journal().needing_reconciliation().await;
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
async fn test_journal_stays_bounded_under_rejections() {
    let mut h = TestHarness::new();
    h.orchestrator = h.orchestrator.with_journal(WorkflowJournal::with_capacity(50));
    h.payments.set_fail_on_request(true).await;
    let stranded = h.orchestrator.create_order(ord_1()).await.unwrap_err();
    h.payments.set_fail_on_request(false).await;

    let mut unknown = ord_1();
    unknown.customer_id = CustomerId::new("999");
    for _ in 0..2000 {
        let err = h.orchestrator.create_order(unknown.clone()).await.unwrap_err();
        assert!(matches!(err, OrderError::CustomerNotFound(_)));
    }

    assert_eq!(h.orchestrator.journal().len().await, 50);
    let pending = h.orchestrator.journal().needing_reconciliation().await;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].order_id(), stranded.committed_order_id());
}

#[tokio::test]
async fn test_invalid_requests_are_rejected_up_front() {
    let h = TestHarness::new();

    let mut blank_customer = ord_1();
    blank_customer.customer_id = CustomerId::new("  ");
    let mut zero_quantity = ord_1();
    zero_quantity.products[1].quantity = 0;
    let mut zero_amount = ord_1();
    zero_amount.amount = Money::zero();

    assert!(matches!(
        h.orchestrator.create_order(blank_customer).await,
        Err(OrderError::InvalidRequest(ValidationError::CustomerIdRequired))
    ));
    assert!(matches!(
        h.orchestrator.create_order(zero_quantity).await,
        Err(OrderError::InvalidRequest(ValidationError::InvalidQuantity { .. }))
    ));
    assert!(matches!(
        h.orchestrator.create_order(zero_amount).await,
        Err(OrderError::InvalidRequest(ValidationError::InvalidAmount { .. }))
    ));
    assert_eq!(h.customers.lookup_count().await, 0);
}

#[tokio::test]
async fn test_list_orders_includes_successes_only() {
    let h = TestHarness::new();

    let first = h.orchestrator.create_order(ord_1()).await.unwrap();
    let mut unknown = ord_1();
    unknown.reference = "ORD-2".to_string();
    unknown.customer_id = CustomerId::new("999");
    let _ = h.orchestrator.create_order(unknown).await;
    let mut third = ord_1();
    third.reference = "ORD-3".to_string();
    let third = h.orchestrator.create_order(third).await.unwrap();

    let ids: Vec<_> = h
        .orchestrator
        .list_orders()
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, vec![first, third]);
}

#[tokio::test]
async fn test_find_all_orders_rereads_storage() {
    let h = TestHarness::new();
    h.orchestrator.create_order(ord_1()).await.unwrap();

    let first_read: Vec<_> = h
        .orchestrator
        .find_all_orders()
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    let mut second = ord_1();
    second.reference = "ORD-2".to_string();
    h.orchestrator.create_order(second).await.unwrap();

    let second_read: Vec<_> = h
        .orchestrator
        .find_all_orders()
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(first_read.len(), 1);
    assert_eq!(second_read.len(), 2);
}

#[tokio::test]
async fn test_find_by_unknown_id() {
    let h = TestHarness::new();

    let result = h.orchestrator.find_by_id(OrderId::new(42)).await;

    assert!(matches!(result, Err(OrderError::OrderNotFound(id)) if id == OrderId::new(42)));
}

#[tokio::test]
async fn test_resubmission_creates_second_order() {
    let h = TestHarness::new();

    let first = h.orchestrator.create_order(ord_1()).await.unwrap();
    let second = h.orchestrator.create_order(ord_1()).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(h.orchestrator.workflows_for_reference("ORD-1").await.len(), 2);
}

#[tokio::test]
async fn test_concurrent_orders_get_distinct_ids() {
    let h = std::sync::Arc::new(TestHarness::new());

    let mut handles = Vec::new();
    for i in 0..16 {
        let h = h.clone();
        handles.push(tokio::spawn(async move {
            let mut request = ord_1();
            request.reference = format!("ORD-C{i}");
            h.orchestrator.create_order(request).await.unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);
    assert_eq!(h.store.line_count().await, 32);

    for id in ids {
        let lines = h.store.find_lines_for_order(id).await.unwrap();
        let products: Vec<_> = lines.iter().map(|l| l.product_id.as_i64()).collect();
        assert_eq!(products, vec![101, 102]);
    }
}
