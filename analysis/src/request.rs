//! Per-view request lifecycle shared by every controller.
//!
//! DESIGN
//! ======
//! One tagged union instead of ad hoc `loading`/`error` flags. A view may have
//! at most one request outstanding; [`RequestTracker::begin`] refuses while
//! one is in flight and hands out a [`Ticket`] otherwise. Only the response
//! carrying the current ticket may settle the state, so responses that were
//! abandoned (form reset) can never overwrite newer state.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use crate::error::ValidationError;

/// Lifecycle of a single view's request.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Submitting,
    Success(T),
    Failed(String),
}

impl<T> RequestState<T> {
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    #[must_use]
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Proof that a request was started. Needed to settle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// Why a submit action did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A local precondition failed; no request was issued.
    Invalid(ValidationError),
    /// A request from this view is still outstanding.
    InFlight,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RequestTracker<T> {
    state: RequestState<T>,
    issued: u64,
    in_flight: Option<u64>,
}

impl<T> Default for RequestTracker<T> {
    fn default() -> Self {
        Self { state: RequestState::Idle, issued: 0, in_flight: None }
    }
}

impl<T> RequestTracker<T> {
    #[must_use]
    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Move to `Submitting` unless a request is already outstanding.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.in_flight.is_some() {
            return None;
        }
        self.issued += 1;
        self.in_flight = Some(self.issued);
        self.state = RequestState::Submitting;
        Some(Ticket(self.issued))
    }

    /// Settle the outstanding request. Returns `false` (and changes nothing)
    /// when `ticket` is not the outstanding one.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        if self.in_flight != Some(ticket.0) {
            return false;
        }
        self.in_flight = None;
        self.state = match outcome {
            Ok(value) => RequestState::Success(value),
            Err(message) => RequestState::Failed(message),
        };
        true
    }

    /// Forget any outstanding request and return to `Idle`. A response for
    /// the forgotten request will be rejected by [`Self::finish`].
    pub fn abandon(&mut self) {
        self.in_flight = None;
        self.state = RequestState::Idle;
    }
}
