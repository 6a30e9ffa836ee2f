//! Product catalog port and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;
use domain::{Money, PurchaseItem, PurchasedProduct};
use tokio::sync::RwLock;

use crate::error::ServiceError;

/// Validates, prices and reserves stock for purchased items.
#[async_trait]
pub trait ProductPurchase: Send + Sync {
    /// Purchases every item or none of them.
    ///
    /// On success returns one priced product per requested item, in request
    /// order. An unknown product or insufficient stock is reported as
    /// [`ServiceError::Rejected`].
    async fn purchase_products(
        &self,
        items: &[PurchaseItem],
    ) -> Result<Vec<PurchasedProduct>, ServiceError>;
}

/// A product held by the in-memory catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub available_quantity: u32,
}

impl CatalogProduct {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        available_quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            available_quantity,
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: HashMap<ProductId, CatalogProduct>,
    purchases: usize,
    fail_on_purchase: bool,
}

/// In-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the given products.
    pub fn with_products(products: impl IntoIterator<Item = CatalogProduct>) -> Self {
        let state = InMemoryCatalogState {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            ..Default::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Returns the stock left for a product.
    pub async fn available_quantity(&self, product_id: ProductId) -> Option<u32> {
        self.state
            .read()
            .await
            .products
            .get(&product_id)
            .map(|p| p.available_quantity)
    }

    /// Configures the catalog to be unreachable.
    pub async fn set_fail_on_purchase(&self, fail: bool) {
        self.state.write().await.fail_on_purchase = fail;
    }

    /// Returns the number of successful purchases.
    pub async fn purchase_count(&self) -> usize {
        self.state.read().await.purchases
    }
}

#[async_trait]
impl ProductPurchase for InMemoryProductCatalog {
    async fn purchase_products(
        &self,
        items: &[PurchaseItem],
    ) -> Result<Vec<PurchasedProduct>, ServiceError> {
        let mut state = self.state.write().await;

        if state.fail_on_purchase {
            return Err(ServiceError::Unavailable(
                "product catalog did not respond".to_string(),
            ));
        }

        // The same product may appear on several lines.
        let mut demand: HashMap<ProductId, u64> = HashMap::new();
        for item in items {
            *demand.entry(item.product_id).or_default() += u64::from(item.quantity);
        }

        for item in items {
            let product = state.products.get(&item.product_id).ok_or_else(|| {
                ServiceError::Rejected(format!("product {} does not exist", item.product_id))
            })?;
            let requested = demand[&item.product_id];
            if requested > u64::from(product.available_quantity) {
                return Err(ServiceError::Rejected(format!(
                    "insufficient stock for product {}: requested {}, available {}",
                    item.product_id, requested, product.available_quantity
                )));
            }
        }

        let mut purchased = Vec::with_capacity(items.len());
        for item in items {
            if let Some(product) = state.products.get_mut(&item.product_id) {
                product.available_quantity -= item.quantity;
                purchased.push(PurchasedProduct {
                    product_id: product.id,
                    name: product.name.clone(),
                    description: product.description.clone(),
                    price: product.price,
                    quantity: item.quantity,
                });
            }
        }
        state.purchases += 1;

        Ok(purchased)
    }
}
