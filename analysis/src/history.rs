//! History list of past structured analyses.
//!
//! SYSTEM CONTEXT
//! ==============
//! The list shown is always the last successful fetch, in service order. It
//! refetches on mount, on every observed [`crate::SyncBus`] version change,
//! and after every delete attempt whether or not the delete succeeded. Rows
//! are never spliced locally.
//!
//! DESIGN
//! ======
//! Fetches and deletes share one request slot so this view never has two
//! requests outstanding. A refetch wanted while the slot is busy is queued and
//! issued as soon as the slot frees; several queued refetches collapse into
//! one. Deletes go through an explicit request/confirm step before any call.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::api::RemoteAnalysisClient;
use crate::cell::StateCell;
use crate::error::AnalysisError;
use crate::model::AnalysisItem;
use crate::request::{RequestTracker, Ticket};

pub const EMPTY_MESSAGE: &str = "No analyses found. Start by analyzing a risk or opportunity above.";
pub const CONFIRM_DELETE_MESSAGE: &str = "Are you sure you want to delete this analysis?";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum HistoryPhase {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// Authorizes one `list_history` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(Ticket);

/// Authorizes one `delete_analysis` call for `id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeleteTicket {
    ticket: Ticket,
    pub id: i64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoryController {
    items: Vec<AnalysisItem>,
    phase: HistoryPhase,
    seen_version: Option<u64>,
    request: RequestTracker<()>,
    refetch_queued: bool,
    confirming: Option<i64>,
    expanded: Option<i64>,
    delete_error: Option<String>,
}

impl HistoryController {
    /// Items from the last successful fetch, in the order received.
    #[must_use]
    pub fn items(&self) -> &[AnalysisItem] {
        &self.items
    }

    #[must_use]
    pub fn phase(&self) -> &HistoryPhase {
        &self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == HistoryPhase::Loading
    }

    /// Whether the empty-state message should replace the table.
    #[must_use]
    pub fn shows_empty_state(&self) -> bool {
        self.phase != HistoryPhase::Loading && self.items.is_empty()
    }

    #[must_use]
    pub fn fetch_error(&self) -> Option<&str> {
        match &self.phase {
            HistoryPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn delete_error(&self) -> Option<&str> {
        self.delete_error.as_deref()
    }

    #[must_use]
    pub fn seen_version(&self) -> Option<u64> {
        self.seen_version
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.request.is_submitting()
    }

    // =========================================================================
    // FETCH
    // =========================================================================

    /// Record the current history version. The first observation (mount) and
    /// every change afterwards start a refetch.
    pub fn observe(&mut self, version: u64) -> Option<FetchTicket> {
        if self.seen_version == Some(version) {
            return None;
        }
        self.seen_version = Some(version);
        self.request_fetch()
    }

    /// Start a fetch now, or queue one if a request is outstanding.
    pub fn request_fetch(&mut self) -> Option<FetchTicket> {
        if let Some(ticket) = self.request.begin() {
            self.phase = HistoryPhase::Loading;
            Some(FetchTicket(ticket))
        } else {
            self.refetch_queued = true;
            None
        }
    }

    /// Settle a fetch. Returns the queued follow-up fetch, if any.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<AnalysisItem>, AnalysisError>,
    ) -> Option<FetchTicket> {
        if !self.request.finish(ticket.0, Ok(())) {
            return None;
        }
        match outcome {
            Ok(items) => {
                self.items = items;
                self.phase = HistoryPhase::Loaded;
                if let Some(id) = self.expanded {
                    if !self.items.iter().any(|item| item.id == id) {
                        self.expanded = None;
                    }
                }
            }
            Err(e) => {
                self.phase = HistoryPhase::Failed(format!("Failed to fetch analysis history: {e}"));
            }
        }
        self.take_queued()
    }

    fn take_queued(&mut self) -> Option<FetchTicket> {
        if !self.refetch_queued {
            return None;
        }
        self.refetch_queued = false;
        self.request_fetch()
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// First phase of a delete: remember which row awaits confirmation and
    /// clear the previous delete's error.
    pub fn request_delete(&mut self, id: i64) {
        self.confirming = Some(id);
        self.delete_error = None;
    }

    pub fn cancel_delete(&mut self) {
        self.confirming = None;
    }

    /// Row awaiting confirmation.
    #[must_use]
    pub fn confirming(&self) -> Option<i64> {
        self.confirming
    }

    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.confirming.is_some() && !self.is_busy()
    }

    /// Second phase of a delete. Returns `None` (and keeps the confirmation
    /// open) when nothing awaits confirmation or a request is outstanding.
    pub fn confirm_delete(&mut self) -> Option<DeleteTicket> {
        let id = self.confirming?;
        let ticket = self.request.begin()?;
        self.confirming = None;
        self.delete_error = None;
        Some(DeleteTicket { ticket, id })
    }

    /// Settle a delete and start the resynchronizing fetch, regardless of
    /// whether the delete succeeded.
    pub fn complete_delete(&mut self, ticket: DeleteTicket, outcome: Result<(), AnalysisError>) -> Option<FetchTicket> {
        if !self.request.finish(ticket.ticket, Ok(())) {
            return None;
        }
        if let Err(e) = outcome {
            self.delete_error = Some(format!("Failed to delete analysis: {e}"));
        }
        self.refetch_queued = false;
        self.request_fetch()
    }

    // =========================================================================
    // DETAILS
    // =========================================================================

    /// Show or hide the in-memory details of one row. Never fetches.
    pub fn toggle_details(&mut self, id: i64) {
        self.expanded = if self.expanded == Some(id) { None } else { Some(id) };
    }

    #[must_use]
    pub fn details(&self) -> Option<&AnalysisItem> {
        let id = self.expanded?;
        self.items.iter().find(|item| item.id == id)
    }
}

// =============================================================================
// DRIVERS
// =============================================================================

async fn fetch_until_settled<A, S>(client: &A, state: &S, mut ticket: FetchTicket)
where
    A: RemoteAnalysisClient + ?Sized,
    S: StateCell<HistoryController>,
{
    loop {
        let outcome = client.list_history().await;
        if let Err(e) = &outcome {
            tracing::debug!(error = %e, "history fetch failed");
        }
        match state.update_with(|h| h.complete_fetch(ticket, outcome)) {
            Some(Some(next)) => ticket = next,
            Some(None) => break,
            None => {
                tracing::debug!("history view gone, dropping fetch result");
                break;
            }
        }
    }
}

/// React to the current history version. Fetches on the first call and on
/// every change; otherwise does nothing.
pub async fn sync<A, S>(client: &A, state: &S, version: u64)
where
    A: RemoteAnalysisClient + ?Sized,
    S: StateCell<HistoryController>,
{
    let Some(Some(ticket)) = state.update_with(|h| h.observe(version)) else {
        return;
    };
    fetch_until_settled(client, state, ticket).await;
}

/// Refetch on explicit user request (retry after a failure).
pub async fn refresh<A, S>(client: &A, state: &S)
where
    A: RemoteAnalysisClient + ?Sized,
    S: StateCell<HistoryController>,
{
    let Some(Some(ticket)) = state.update_with(HistoryController::request_fetch) else {
        return;
    };
    fetch_until_settled(client, state, ticket).await;
}

/// Perform the confirmed delete, then resynchronize the list.
/// Returns `true` when the service accepted the delete.
pub async fn confirm_delete<A, S>(client: &A, state: &S) -> bool
where
    A: RemoteAnalysisClient + ?Sized,
    S: StateCell<HistoryController>,
{
    let Some(Some(pending)) = state.update_with(HistoryController::confirm_delete) else {
        return false;
    };

    let outcome = client.delete_analysis(pending.id).await;
    let deleted = outcome.is_ok();
    if let Err(e) = &outcome {
        tracing::debug!(id = pending.id, error = %e, "delete failed");
    }

    if let Some(Some(ticket)) = state.update_with(|h| h.complete_delete(pending, outcome)) {
        fetch_until_settled(client, state, ticket).await;
    }
    deleted
}
