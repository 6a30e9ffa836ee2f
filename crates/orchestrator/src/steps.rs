//! Names of the order creation steps, used in logs, metrics and workflow
//! failure records.

/// Step name: Validate the inbound request.
pub const STEP_VALIDATE_REQUEST: &str = "validate_request";

/// Step name: Resolve the customer in the customer registry.
pub const STEP_LOOKUP_CUSTOMER: &str = "lookup_customer";

/// Step name: Purchase the requested products from the catalog.
pub const STEP_PURCHASE_PRODUCTS: &str = "purchase_products";

/// Step name: Persist the order.
pub const STEP_SAVE_ORDER: &str = "save_order";

/// Step name: Persist the order lines.
pub const STEP_SAVE_ORDER_LINES: &str = "save_order_lines";

/// Step name: Submit the payment request.
pub const STEP_REQUEST_PAYMENT: &str = "request_payment";

/// Step name: Publish the order confirmation.
pub const STEP_PUBLISH_CONFIRMATION: &str = "publish_confirmation";

/// Step name: Read an order back from the store.
pub const STEP_READ_ORDERS: &str = "read_orders";
