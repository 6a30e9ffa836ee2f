//! Workflow journal endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use orchestrator::WorkflowRecord;
use order_store::OrderStore;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WorkflowResponse {
    pub attempt_id: String,
    pub reference: String,
    pub customer_id: String,
    pub order_id: Option<i64>,
    pub state: String,
    pub lines_requested: usize,
    pub lines_persisted: usize,
    pub payment_id: Option<String>,
    pub failed_step: Option<String>,
    pub failure_reason: Option<String>,
    pub needs_reconciliation: bool,
    pub started_at: String,
    pub updated_at: String,
}

impl From<WorkflowRecord> for WorkflowResponse {
    fn from(record: WorkflowRecord) -> Self {
        Self {
            attempt_id: record.attempt_id().to_string(),
            reference: record.reference().to_string(),
            customer_id: record.customer_id().to_string(),
            order_id: record.order_id().map(i64::from),
            state: record.state().to_string(),
            lines_requested: record.lines_requested(),
            lines_persisted: record.lines_persisted(),
            payment_id: record.payment_id().map(String::from),
            failed_step: record.failure().map(|f| f.step.clone()),
            failure_reason: record.failure().map(|f| f.reason.clone()),
            needs_reconciliation: record.needs_reconciliation(),
            started_at: record.started_at().to_rfc3339(),
            updated_at: record.updated_at().to_rfc3339(),
        }
    }
}

/// GET /workflows/{reference}: every creation attempt for a reference,
/// oldest first.
#[tracing::instrument(skip(state))]
pub async fn for_reference<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(reference): Path<String>,
) -> Json<Vec<WorkflowResponse>> {
    let attempts = state.orchestrator.workflows_for_reference(&reference).await;
    Json(attempts.into_iter().map(WorkflowResponse::from).collect())
}
