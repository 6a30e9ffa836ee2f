//! Order creation workflow state machine.

use serde::{Deserialize, Serialize};

use crate::steps;

/// The progress of one order creation attempt.
///
/// State transitions (forward only, one step at a time):
/// ```text
/// Start ──► CustomerResolved ──► ProductsPurchased ──► OrderPersisted
///                                                          │
///   Done ◄── ConfirmationSent ◄── PaymentRequested ◄── LinesPersisted
/// ```
///
/// A failure stops the workflow in the last state it reached; nothing is
/// rolled back. States from `OrderPersisted` onwards mean the order row
/// exists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum WorkflowState {
    /// The request was validated and the workflow started.
    #[default]
    Start,

    /// The customer exists.
    CustomerResolved,

    /// The catalog confirmed and priced every item.
    ProductsPurchased,

    /// The order row was committed and has an id.
    OrderPersisted,

    /// Every requested line was committed.
    LinesPersisted,

    /// The payment processor accepted the payment request.
    PaymentRequested,

    /// The confirmation was handed to the notification bus.
    ConfirmationSent,

    /// The workflow finished (terminal state).
    Done,
}

impl WorkflowState {
    /// Returns the state that follows this one, or None for `Done`.
    pub fn next(&self) -> Option<WorkflowState> {
        match self {
            WorkflowState::Start => Some(WorkflowState::CustomerResolved),
            WorkflowState::CustomerResolved => Some(WorkflowState::ProductsPurchased),
            WorkflowState::ProductsPurchased => Some(WorkflowState::OrderPersisted),
            WorkflowState::OrderPersisted => Some(WorkflowState::LinesPersisted),
            WorkflowState::LinesPersisted => Some(WorkflowState::PaymentRequested),
            WorkflowState::PaymentRequested => Some(WorkflowState::ConfirmationSent),
            WorkflowState::ConfirmationSent => Some(WorkflowState::Done),
            WorkflowState::Done => None,
        }
    }

    /// Returns true if the workflow may move from this state to `to`.
    pub fn can_advance_to(&self, to: WorkflowState) -> bool {
        self.next() == Some(to)
    }

    /// Returns true if the order row has been committed in this state.
    pub fn is_committed(&self) -> bool {
        *self >= WorkflowState::OrderPersisted
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Done)
    }

    /// Returns the name of the step that leads into this state.
    pub fn step_name(&self) -> &'static str {
        match self {
            WorkflowState::Start => steps::STEP_VALIDATE_REQUEST,
            WorkflowState::CustomerResolved => steps::STEP_LOOKUP_CUSTOMER,
            WorkflowState::ProductsPurchased => steps::STEP_PURCHASE_PRODUCTS,
            WorkflowState::OrderPersisted => steps::STEP_SAVE_ORDER,
            WorkflowState::LinesPersisted => steps::STEP_SAVE_ORDER_LINES,
            WorkflowState::PaymentRequested => steps::STEP_REQUEST_PAYMENT,
            WorkflowState::ConfirmationSent | WorkflowState::Done => {
                steps::STEP_PUBLISH_CONFIRMATION
            }
        }
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Start => "Start",
            WorkflowState::CustomerResolved => "CustomerResolved",
            WorkflowState::ProductsPurchased => "ProductsPurchased",
            WorkflowState::OrderPersisted => "OrderPersisted",
            WorkflowState::LinesPersisted => "LinesPersisted",
            WorkflowState::PaymentRequested => "PaymentRequested",
            WorkflowState::ConfirmationSent => "ConfirmationSent",
            WorkflowState::Done => "Done",
        }
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
