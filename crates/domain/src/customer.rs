//! Customer record returned by the customer registry.

use common::CustomerId;
use serde::{Deserialize, Serialize};

/// A customer as resolved by the customer registry.
///
/// The orchestrator treats it as data: it is copied into the payment request
/// and the confirmation event, never used as identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Customer {
    /// Creates a new customer record.
    pub fn new(
        id: impl Into<CustomerId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}
