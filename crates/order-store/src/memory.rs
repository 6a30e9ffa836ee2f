use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{OrderId, OrderLineId};
use domain::{NewOrder, Order, OrderLine, OrderLineRequest};
use tokio::sync::RwLock;

use crate::{
    Result, StoreError,
    store::{OrderStore, OrderStream},
};

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: BTreeMap<OrderId, Order>,
    lines: Vec<OrderLine>,
    last_order_id: i64,
    last_line_id: i64,
    fail_on_save_order: bool,
    fail_on_line: Option<usize>,
}

/// In-memory order store for testing.
///
/// Identifiers are assigned under the write lock, starting at 1, so
/// concurrent saves never share an id. Orders are iterated in id order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Returns the number of order lines stored, across all orders.
    pub async fn line_count(&self) -> usize {
        self.state.read().await.lines.len()
    }

    /// Configures the store to reject order writes.
    pub async fn set_fail_on_save_order(&self, fail: bool) {
        self.state.write().await.fail_on_save_order = fail;
    }

    /// Configures the store to reject a line write once the target order
    /// already has `index` lines. `None` disables the failure.
    pub async fn set_fail_on_line(&self, index: Option<usize>) {
        self.state.write().await.fail_on_line = index;
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save_order(&self, order: NewOrder) -> Result<Order> {
        let mut state = self.state.write().await;

        if state.fail_on_save_order {
            return Err(StoreError::Unavailable(
                "order table is not accepting writes".to_string(),
            ));
        }

        state.last_order_id += 1;
        let order = order.into_order(OrderId::new(state.last_order_id), Utc::now());
        state.orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn save_order_line(&self, line: OrderLineRequest) -> Result<OrderLine> {
        let mut state = self.state.write().await;

        if !state.orders.contains_key(&line.order_id) {
            return Err(StoreError::OrderMissing(line.order_id));
        }

        let existing = state
            .lines
            .iter()
            .filter(|l| l.order_id == line.order_id)
            .count();
        if state.fail_on_line == Some(existing) {
            return Err(StoreError::Unavailable(format!(
                "order_line table rejected line {existing} of order {}",
                line.order_id
            )));
        }

        state.last_line_id += 1;
        let saved = OrderLine {
            id: OrderLineId::new(state.last_line_id),
            order_id: line.order_id,
            product_id: line.product_id,
            quantity: line.quantity,
        };
        state.lines.push(saved);

        Ok(saved)
    }

    async fn stream_orders(&self) -> Result<OrderStream> {
        use futures_util::stream;

        let orders: Vec<Order> = self.state.read().await.orders.values().cloned().collect();

        let stream = stream::iter(orders.into_iter().map(Ok));
        Ok(Box::pin(stream))
    }

    async fn find_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self.state.read().await.orders.get(&order_id).cloned())
    }

    async fn find_lines_for_order(&self, order_id: OrderId) -> Result<Vec<OrderLine>> {
        let state = self.state.read().await;
        let mut lines: Vec<_> = state
            .lines
            .iter()
            .filter(|l| l.order_id == order_id)
            .copied()
            .collect();
        lines.sort_by_key(|l| l.id);
        Ok(lines)
    }

    async fn ping(&self) -> Result<()> {
        if self.state.read().await.fail_on_save_order {
            return Err(StoreError::Unavailable(
                "order table is not accepting writes".to_string(),
            ));
        }
        Ok(())
    }
}
