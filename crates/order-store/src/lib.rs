//! Persistence for orders and order lines.
//!
//! [`OrderStore`] is the storage port the orchestrator writes through. Two
//! implementations are provided: [`InMemoryOrderStore`] for tests and local
//! runs, and [`PostgresOrderStore`] backed by `sqlx`.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;
pub use store::{OrderStore, OrderStoreExt, OrderStream};
