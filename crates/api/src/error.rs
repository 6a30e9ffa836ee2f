//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orchestrator::{OrderError, ServiceError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Order workflow or read path error.
    Order(OrderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
            }
            ApiError::Order(err) => order_error_to_response(err),
        };

        (status, axum::Json(body)).into_response()
    }
}

fn order_error_status(err: &OrderError) -> StatusCode {
    match err {
        OrderError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        OrderError::CustomerNotFound(_) | OrderError::OrderNotFound(_) => StatusCode::NOT_FOUND,
        OrderError::ProductPurchaseFailed(ServiceError::Rejected(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        OrderError::CustomerLookupFailed(_)
        | OrderError::ProductPurchaseFailed(ServiceError::Unavailable(_))
        | OrderError::PaymentRequestFailed { .. }
        | OrderError::ConfirmationPublishFailed { .. } => StatusCode::BAD_GATEWAY,
        OrderError::OrderPersistenceFailed(_)
        | OrderError::OrderLinePersistenceFailed { .. }
        | OrderError::Storage(_)
        | OrderError::InvalidTransition { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn order_error_to_response(err: OrderError) -> (StatusCode, serde_json::Value) {
    let status = order_error_status(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, step = err.step(), "order request failed");
    }

    let mut body = serde_json::json!({
        "error": err.to_string(),
        "step": err.step(),
    });
    // The order exists even though the call failed.
    if let Some(order_id) = err.committed_order_id() {
        body["order_id"] = serde_json::json!(order_id);
    }
    (status, body)
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Order(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{CustomerId, OrderId};
    use domain::ValidationError;
    use order_store::StoreError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                OrderError::InvalidRequest(ValidationError::NoProducts),
                StatusCode::BAD_REQUEST,
            ),
            (
                OrderError::CustomerNotFound(CustomerId::new("999")),
                StatusCode::NOT_FOUND,
            ),
            (
                OrderError::OrderNotFound(OrderId::new(1)),
                StatusCode::NOT_FOUND,
            ),
            (
                OrderError::ProductPurchaseFailed(ServiceError::Rejected("555".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                OrderError::ProductPurchaseFailed(ServiceError::Unavailable("down".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                OrderError::PaymentRequestFailed {
                    order_id: OrderId::new(1),
                    source: ServiceError::Unavailable("down".into()),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                OrderError::OrderPersistenceFailed(StoreError::Unavailable("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(order_error_status(&err), expected, "{err}");
        }
    }

    #[test]
    fn test_committed_order_id_in_body() {
        let (status, body) = order_error_to_response(OrderError::ConfirmationPublishFailed {
            order_id: OrderId::new(9),
            source: ServiceError::Unavailable("no subscribers".into()),
        });

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["order_id"], 9);
        assert_eq!(body["step"], "publish_confirmation");
    }

    #[test]
    fn test_no_order_id_before_commit() {
        let (_, body) =
            order_error_to_response(OrderError::CustomerNotFound(CustomerId::new("999")));

        assert!(body.get("order_id").is_none());
    }
}
