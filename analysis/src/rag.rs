//! Free-text RAG query panel with an advisory corpus status poll.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two flows share this controller but no request slot: the query request
//! (user-visible success/failure) and the status poll (advisory, failures are
//! logged and swallowed). Queries create nothing persistent and therefore
//! never touch the history version.

#[cfg(test)]
#[path = "rag_test.rs"]
mod rag_test;

use crate::api::{RemoteAnalysisClient, require_query};
use crate::cell::StateCell;
use crate::error::AnalysisError;
use crate::model::RagStatus;
use crate::request::{RequestState, RequestTracker, SubmitBlocked, Ticket};

pub const RESULT_PLACEHOLDER: &str = "Enter a query above and click \"RAG Analyze\" to see results here...";

/// A query that passed validation and is about to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingQuery {
    pub ticket: Ticket,
    pub text: String,
}

/// What a key press in the query box should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Plain Enter: submit the query.
    Submit,
    /// Shift+Enter: let the text area insert a line break.
    Newline,
    /// Any other key: default handling.
    Passthrough,
}

/// Map a key press in the multi-line query box to an action.
#[must_use]
pub fn key_action(key: &str, shift: bool) -> KeyAction {
    match (key, shift) {
        ("Enter", false) => KeyAction::Submit,
        ("Enter", true) => KeyAction::Newline,
        _ => KeyAction::Passthrough,
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RagAnalysisController {
    query: String,
    request: RequestTracker<String>,
    status: RagStatus,
    status_poll: RequestTracker<()>,
    status_poll_queued: bool,
}

impl RagAnalysisController {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    #[must_use]
    pub fn state(&self) -> &RequestState<String> {
        self.request.state()
    }

    /// Text of the last successful answer.
    #[must_use]
    pub fn result(&self) -> Option<&str> {
        self.request.state().success().map(String::as_str)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.request.state().error()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.request.is_submitting()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && require_query(&self.query).is_ok()
    }

    #[must_use]
    pub fn status(&self) -> &RagStatus {
        &self.status
    }

    /// Validate the query and enter `Submitting`, clearing the previous answer.
    ///
    /// # Errors
    ///
    /// [`SubmitBlocked::InFlight`] while a query is outstanding,
    /// [`SubmitBlocked::Invalid`] for blank text.
    pub fn begin_query(&mut self) -> Result<PendingQuery, SubmitBlocked> {
        if self.is_submitting() {
            return Err(SubmitBlocked::InFlight);
        }
        require_query(&self.query).map_err(SubmitBlocked::Invalid)?;
        let ticket = self.request.begin().ok_or(SubmitBlocked::InFlight)?;
        Ok(PendingQuery { ticket, text: self.query.clone() })
    }

    /// Settle a query. Returns `false` for a response that is no longer wanted.
    pub fn complete_query(&mut self, ticket: Ticket, outcome: Result<String, AnalysisError>) -> bool {
        self.request
            .finish(ticket, outcome.map_err(|e| format!("Analysis failed: {e}")))
    }

    /// Start a status poll, or queue one if a poll is already outstanding.
    /// Queued polls collapse into a single follow-up.
    pub fn begin_status_poll(&mut self) -> Option<Ticket> {
        let ticket = self.status_poll.begin();
        if ticket.is_none() {
            self.status_poll_queued = true;
        }
        ticket
    }

    /// Start the follow-up poll queued while the last one was outstanding.
    pub fn take_queued_poll(&mut self) -> Option<Ticket> {
        if !self.status_poll_queued {
            return None;
        }
        self.status_poll_queued = false;
        self.begin_status_poll()
    }

    /// Replace the status snapshot on success. Failures keep the previous
    /// snapshot and are only logged.
    pub fn complete_status_poll(&mut self, ticket: Ticket, outcome: Result<RagStatus, AnalysisError>) -> bool {
        match outcome {
            Ok(status) => {
                if !self.status_poll.finish(ticket, Ok(())) {
                    return false;
                }
                self.status = status;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch RAG status");
                self.status_poll.finish(ticket, Err(e.to_string()))
            }
        }
    }
}

/// Poll the corpus status. When a poll is already outstanding, a follow-up
/// is queued and issued by that poll's driver once it settles.
/// Returns `true` when a new snapshot was stored by this call.
pub async fn poll_status<A, S>(client: &A, state: &S) -> bool
where
    A: RemoteAnalysisClient + ?Sized,
    S: StateCell<RagAnalysisController>,
{
    let Some(Some(mut ticket)) = state.update_with(RagAnalysisController::begin_status_poll) else {
        return false;
    };
    let mut stored_any = false;
    loop {
        let outcome = client.fetch_rag_status().await;
        let stored = outcome.is_ok();
        let next = state.update_with(|c| {
            let applied = c.complete_status_poll(ticket, outcome);
            (applied, c.take_queued_poll())
        });
        match next {
            Some((applied, follow_up)) => {
                stored_any |= applied && stored;
                match follow_up {
                    Some(next) => ticket = next,
                    None => break,
                }
            }
            None => {
                tracing::debug!("rag panel gone, dropping status result");
                break;
            }
        }
    }
    stored_any
}

/// Run one query end to end, then refresh the corpus status whatever the
/// outcome. Inert for blank text or while a query is outstanding.
/// Returns `true` when an answer was stored.
pub async fn run_query<A, S>(client: &A, state: &S) -> bool
where
    A: RemoteAnalysisClient + ?Sized,
    S: StateCell<RagAnalysisController>,
{
    let pending = match state.update_with(RagAnalysisController::begin_query) {
        Some(Ok(pending)) => pending,
        Some(Err(blocked)) => {
            tracing::debug!(?blocked, "rag query ignored");
            return false;
        }
        None => return false,
    };

    let outcome = client.submit_rag_query(&pending.text).await;
    let succeeded = outcome.is_ok();
    let applied = state
        .update_with(|c| c.complete_query(pending.ticket, outcome))
        .unwrap_or(false);
    if !applied {
        tracing::debug!("discarding stale rag response");
        return false;
    }

    poll_status(client, state).await;
    succeeded
}
