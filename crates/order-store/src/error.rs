use common::OrderId;
use thiserror::Error;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An order line referenced an order that does not exist.
    #[error("Order not found: {0}")]
    OrderMissing(OrderId),

    /// The store could not accept the write.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A value could not be mapped to or from its column.
    #[error("Invalid value for column {column}: {reason}")]
    InvalidValue { column: &'static str, reason: String },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
