use std::pin::Pin;

use async_trait::async_trait;
use common::OrderId;
use domain::{NewOrder, Order, OrderLine, OrderLineRequest};
use futures_core::Stream;
use futures_util::TryStreamExt;

use crate::Result;

/// A stream of persisted orders.
pub type OrderStream = Pin<Box<dyn Stream<Item = Result<Order>> + Send>>;

/// Storage port for orders and their lines.
///
/// Implementations must assign identifiers atomically, so concurrent callers
/// never receive the same order id, and must make a saved order visible to
/// the line writes that immediately follow it. All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order and returns it with its assigned id and
    /// creation timestamp.
    async fn save_order(&self, order: NewOrder) -> Result<Order>;

    /// Persists one line of an existing order.
    ///
    /// Fails with `OrderMissing` if the referenced order does not exist.
    async fn save_order_line(&self, line: OrderLineRequest) -> Result<OrderLine>;

    /// Streams every persisted order in id order.
    ///
    /// Orders written after this call may or may not appear in the returned
    /// stream; call again to observe later writes. The in-memory store
    /// snapshots its orders when called, the Postgres store reads rows
    /// lazily as the stream is polled.
    async fn stream_orders(&self) -> Result<OrderStream>;

    /// Loads an order by id.
    ///
    /// Returns None if the order doesn't exist.
    async fn find_order(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// Loads the lines of an order in the order they were saved.
    async fn find_lines_for_order(&self, order_id: OrderId) -> Result<Vec<OrderLine>>;

    /// Checks that the store can serve requests.
    async fn ping(&self) -> Result<()>;
}

/// Extension trait providing convenience methods for order stores.
#[async_trait]
pub trait OrderStoreExt: OrderStore {
    /// Collects every persisted order into a vector.
    async fn all_orders(&self) -> Result<Vec<Order>> {
        self.stream_orders().await?.try_collect().await
    }

    /// Checks if an order exists.
    async fn order_exists(&self, order_id: OrderId) -> Result<bool> {
        Ok(self.find_order(order_id).await?.is_some())
    }
}

// Blanket implementation for all OrderStore implementations
impl<T: OrderStore + ?Sized> OrderStoreExt for T {}
