//! Customer registry port and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::CustomerId;
use domain::Customer;
use tokio::sync::RwLock;

use crate::error::ServiceError;

/// Resolves customers by id.
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    /// Returns the customer, or None if the registry does not know it.
    async fn find_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<Customer>, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryCustomerState {
    customers: HashMap<CustomerId, Customer>,
    lookups: usize,
    fail_on_lookup: bool,
}

/// In-memory customer registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRegistry {
    state: Arc<RwLock<InMemoryCustomerState>>,
}

impl InMemoryCustomerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the given customers.
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let state = InMemoryCustomerState {
            customers: customers.into_iter().map(|c| (c.id.clone(), c)).collect(),
            ..Default::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Adds or replaces a customer.
    pub async fn register(&self, customer: Customer) {
        self.state
            .write()
            .await
            .customers
            .insert(customer.id.clone(), customer);
    }

    /// Configures the registry to be unreachable.
    pub async fn set_fail_on_lookup(&self, fail: bool) {
        self.state.write().await.fail_on_lookup = fail;
    }

    /// Returns how many lookups were made, including failed ones.
    pub async fn lookup_count(&self) -> usize {
        self.state.read().await.lookups
    }
}

#[async_trait]
impl CustomerLookup for InMemoryCustomerRegistry {
    async fn find_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<Customer>, ServiceError> {
        let mut state = self.state.write().await;
        state.lookups += 1;

        if state.fail_on_lookup {
            return Err(ServiceError::Unavailable(
                "customer registry did not respond".to_string(),
            ));
        }

        Ok(state.customers.get(customer_id).cloned())
    }
}
