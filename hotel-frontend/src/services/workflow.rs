//! Booking lifecycle state machine.
//!
//! The backend is the system of record; this enum exists so the views agree
//! on where a booking stands and which transitions are legal. Transitions
//! fire only after a successful backend response. A rejected event returns
//! an error and the caller keeps its current state.

use std::fmt;

use crate::models::{Booking, Payment, Refund};

/// Where a booking sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Browsing rooms; nothing selected yet.
    Searching,
    /// A room is chosen; dates entered but no booking exists.
    Selected,
    /// Unconfirmed booking created, awaiting payment.
    Pending,
    /// Payment form in progress.
    Paying,
    /// Payment captured; booking confirmed.
    Confirmed,
    /// Refund requested against the booking's payment.
    RefundRequested,
    /// Refund computed and recorded by the backend.
    Refunded,
}

/// Successful backend responses that advance the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent {
    RoomSelected,
    BookingCreated,
    PaymentStarted,
    PaymentCaptured,
    RefundRequested,
    RefundCompleted,
    RefundWithdrawn,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("event {event:?} is not valid in state {state:?}")]
pub struct WorkflowError {
    pub state: WorkflowState,
    pub event: WorkflowEvent,
}

impl WorkflowState {
    /// Apply an event, yielding the next state. Invalid pairs error without
    /// consuming the current state.
    pub fn apply(self, event: WorkflowEvent) -> Result<WorkflowState, WorkflowError> {
        use WorkflowEvent as E;
        use WorkflowState as S;

        let next = match (self, event) {
            (S::Searching, E::RoomSelected) => S::Selected,
            (S::Selected, E::BookingCreated) => S::Pending,
            (S::Pending, E::PaymentStarted) => S::Paying,
            (S::Paying, E::PaymentCaptured) => S::Confirmed,
            (S::Confirmed, E::RefundRequested) => S::RefundRequested,
            (S::RefundRequested, E::RefundWithdrawn) => S::Confirmed,
            (S::RefundRequested, E::RefundCompleted) => S::Refunded,
            (state, event) => return Err(WorkflowError { state, event }),
        };
        Ok(next)
    }

    /// Classify backend records into a lifecycle stage. Used by the views to
    /// route users, e.g. a confirmed booking skips the payment form.
    ///
    /// Only `Pending`, `Confirmed` and `Refunded` can come out of here: the
    /// backend records no in-flight refund (the refund call computes and
    /// records in one step), and the transient browsing/paying states never
    /// appear in stored data.
    pub fn of(booking: &Booking, payment: Option<&Payment>, refund: Option<&Refund>) -> Self {
        if refund.is_some() {
            return WorkflowState::Refunded;
        }
        if booking.is_confirmed || payment.is_some() || booking.payment_id.is_some() {
            return WorkflowState::Confirmed;
        }
        WorkflowState::Pending
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkflowState::Searching => "Searching",
            WorkflowState::Selected => "Room selected",
            WorkflowState::Pending => "Awaiting payment",
            WorkflowState::Paying => "Payment in progress",
            WorkflowState::Confirmed => "Confirmed",
            WorkflowState::RefundRequested => "Refund requested",
            WorkflowState::Refunded => "Refunded",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
