//! Order request, order entity and order line types.

mod entity;
mod line;
mod request;
mod value_objects;

pub use entity::{NewOrder, Order, OrderSummary};
pub use line::{OrderLine, OrderLineRequest};
pub use request::{OrderRequest, PurchaseItem};
pub use value_objects::{Money, PaymentMethod, UnknownPaymentMethod};
