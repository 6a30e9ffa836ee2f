//! Per-attempt record of order creation progress.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use domain::OrderRequest;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::OrderError;
use crate::state::WorkflowState;

/// Why and where an attempt stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowFailure {
    pub step: String,
    pub reason: String,
    pub failed_at: DateTime<Utc>,
}

/// Progress of a single order creation attempt.
///
/// The record only moves forward through [`WorkflowState`]. When a step
/// fails the state stays at the last step that succeeded and `failure`
/// describes what went wrong.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRecord {
    attempt_id: Uuid,
    reference: String,
    customer_id: CustomerId,
    order_id: Option<OrderId>,
    state: WorkflowState,
    lines_requested: usize,
    lines_persisted: usize,
    payment_id: Option<String>,
    failure: Option<WorkflowFailure>,
    started_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WorkflowRecord {
    /// Starts a record for a validated request.
    pub fn start(request: &OrderRequest) -> Self {
        let now = Utc::now();
        Self {
            attempt_id: Uuid::new_v4(),
            reference: request.reference.clone(),
            customer_id: request.customer_id.clone(),
            order_id: None,
            state: WorkflowState::Start,
            lines_requested: request.products.len(),
            lines_persisted: 0,
            payment_id: None,
            failure: None,
            started_at: now,
            updated_at: now,
        }
    }

    /// Moves the record to `to`.
    pub fn advance(&mut self, to: WorkflowState) -> Result<(), OrderError> {
        if self.failure.is_some() || !self.state.can_advance_to(to) {
            return Err(OrderError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn assign_order(&mut self, order_id: OrderId) {
        self.order_id = Some(order_id);
        self.updated_at = Utc::now();
    }

    pub fn record_line(&mut self) {
        self.lines_persisted += 1;
        self.updated_at = Utc::now();
    }

    pub fn record_payment(&mut self, payment_id: impl Into<String>) {
        self.payment_id = Some(payment_id.into());
        self.updated_at = Utc::now();
    }

    /// Marks the attempt as stopped at `step`.
    pub fn fail(&mut self, step: &str, reason: impl Into<String>) {
        let now = Utc::now();
        self.failure = Some(WorkflowFailure {
            step: step.to_string(),
            reason: reason.into(),
            failed_at: now,
        });
        self.updated_at = now;
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn lines_requested(&self) -> usize {
        self.lines_requested
    }

    pub fn lines_persisted(&self) -> usize {
        self.lines_persisted
    }

    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    pub fn failure(&self) -> Option<&WorkflowFailure> {
        self.failure.as_ref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns true if the attempt either completed or failed.
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal() || self.failure.is_some()
    }

    /// Returns true if the attempt failed after its order was committed,
    /// leaving an order that was never fully processed.
    pub fn needs_reconciliation(&self) -> bool {
        self.failure.is_some() && self.state.is_committed()
    }
}

/// Records kept by [`WorkflowJournal::new`] before finished attempts are
/// evicted.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 10_000;

#[derive(Debug, Default)]
struct JournalState {
    records: HashMap<Uuid, WorkflowRecord>,
    /// Attempt ids in the order they were first recorded.
    arrival: VecDeque<Uuid>,
}

impl JournalState {
    /// Drops the oldest finished attempts until at most `capacity` records
    /// remain. Attempts still running and attempts that need reconciliation
    /// are never dropped, so the journal may stay above `capacity`.
    fn evict(&mut self, capacity: usize) {
        let JournalState { records, arrival } = self;
        let mut excess = records.len().saturating_sub(capacity);

        arrival.retain(|attempt_id| {
            if excess == 0 {
                return true;
            }
            let evictable = records
                .get(attempt_id)
                .is_some_and(|r| r.is_finished() && !r.needs_reconciliation());
            if evictable {
                records.remove(attempt_id);
                excess -= 1;
            }
            !evictable
        });
    }
}

/// Shared in-process journal of workflow records, keyed by attempt id.
///
/// The journal is observational only. It does not survive a restart and
/// nothing resumes a workflow from it. It holds at most `capacity` records,
/// evicting the oldest finished attempts first.
#[derive(Debug, Clone)]
pub struct WorkflowJournal {
    state: Arc<RwLock<JournalState>>,
    capacity: usize,
}

impl Default for WorkflowJournal {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_JOURNAL_CAPACITY)
    }
}

impl WorkflowJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a journal that keeps at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(JournalState::default())),
            capacity,
        }
    }

    /// Inserts or replaces the record for its attempt id.
    pub async fn record(&self, record: &WorkflowRecord) {
        let mut state = self.state.write().await;

        if state
            .records
            .insert(record.attempt_id, record.clone())
            .is_none()
        {
            state.arrival.push_back(record.attempt_id);
        }

        if state.records.len() > self.capacity {
            state.evict(self.capacity);
        }
    }

    pub async fn get(&self, attempt_id: Uuid) -> Option<WorkflowRecord> {
        self.state.read().await.records.get(&attempt_id).cloned()
    }

    /// Returns every attempt made with the given order reference, oldest
    /// first.
    pub async fn for_reference(&self, reference: &str) -> Vec<WorkflowRecord> {
        let state = self.state.read().await;
        let mut matching: Vec<_> = state
            .records
            .values()
            .filter(|r| r.reference == reference)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.started_at);
        matching
    }

    /// Returns attempts that failed after committing their order, oldest
    /// first.
    pub async fn needing_reconciliation(&self) -> Vec<WorkflowRecord> {
        let state = self.state.read().await;
        let mut matching: Vec<_> = state
            .records
            .values()
            .filter(|r| r.needs_reconciliation())
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.started_at);
        matching
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.records.is_empty()
    }
}
