//! Order creation and lookup endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::OrderId;
use domain::{OrderLine, OrderRequest, OrderSummary};
use order_store::OrderStore;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub order_id: OrderId,
}

/// POST /orders: run the order creation workflow.
#[tracing::instrument(skip(state, req), fields(reference = %req.reference))]
pub async fn create<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<OrderRequest>,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), ApiError> {
    let order_id = state.orchestrator.create_order(req).await?;
    Ok((StatusCode::CREATED, Json(OrderCreatedResponse { order_id })))
}

/// GET /orders: list every persisted order.
#[tracing::instrument(skip(state))]
pub async fn list<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<OrderSummary>>, ApiError> {
    Ok(Json(state.orchestrator.list_orders().await?))
}

/// GET /orders/{id}: load one order.
#[tracing::instrument(skip(state))]
pub async fn get<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderSummary>, ApiError> {
    let order_id = parse_order_id(&id)?;
    Ok(Json(state.orchestrator.find_by_id(order_id).await?))
}

/// GET /orders/{id}/lines: load the lines of one order in request order.
#[tracing::instrument(skip(state))]
pub async fn lines<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<OrderLine>>, ApiError> {
    let order_id = parse_order_id(&id)?;
    Ok(Json(state.orchestrator.find_order_lines(order_id).await?))
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    id.parse::<i64>()
        .map(OrderId::new)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order id {id:?}: {e}")))
}
