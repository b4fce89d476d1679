//! Structured ("AI") analysis form: one titled, typed item scored per submit.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form owns its draft and the last response. A successful submission
//! bumps the shared [`SyncBus`] so the history list refreshes; the result
//! panel and the history list are never reconciled beyond that signal.

#[cfg(test)]
#[path = "structured_test.rs"]
mod structured_test;

use crate::api::RemoteAnalysisClient;
use crate::bus::SyncBus;
use crate::cell::StateCell;
use crate::error::AnalysisError;
use crate::model::{AnalysisItem, AnalysisType, SubmissionDraft};
use crate::request::{RequestState, RequestTracker, SubmitBlocked, Ticket};

pub const RESULT_PLACEHOLDER: &str =
    "Enter analysis details above and click \"AI Analyze\" to see results here...";

/// A submission that passed validation and is about to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSubmission {
    pub ticket: Ticket,
    pub draft: SubmissionDraft,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructuredAnalysisController {
    draft: SubmissionDraft,
    request: RequestTracker<AnalysisItem>,
}

impl StructuredAnalysisController {
    #[must_use]
    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_kind(&mut self, kind: AnalysisType) {
        self.draft.kind = kind;
    }

    #[must_use]
    pub fn state(&self) -> &RequestState<AnalysisItem> {
        self.request.state()
    }

    /// The item returned by the last successful submission.
    #[must_use]
    pub fn result(&self) -> Option<&AnalysisItem> {
        self.request.state().success()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.request.state().error()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.request.is_submitting()
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.draft.is_complete()
    }

    /// Validate the draft and enter `Submitting`.
    ///
    /// # Errors
    ///
    /// [`SubmitBlocked::InFlight`] while a submission is outstanding,
    /// [`SubmitBlocked::Invalid`] when title or description is blank.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitBlocked> {
        if self.is_submitting() {
            return Err(SubmitBlocked::InFlight);
        }
        self.draft.validate().map_err(SubmitBlocked::Invalid)?;
        let ticket = self.request.begin().ok_or(SubmitBlocked::InFlight)?;
        Ok(PendingSubmission { ticket, draft: self.draft.clone() })
    }

    /// Settle a submission. The draft is kept either way so the user can
    /// resubmit. Returns `false` for a response that is no longer wanted.
    pub fn complete_submit(&mut self, ticket: Ticket, outcome: Result<AnalysisItem, AnalysisError>) -> bool {
        self.request.finish(ticket, outcome.map_err(|e| failure_message(&e)))
    }

    /// Restore an empty draft and drop any outstanding submission.
    pub fn reset(&mut self) {
        self.draft = SubmissionDraft::default();
        self.request.abandon();
    }
}

#[must_use]
pub fn failure_message(err: &AnalysisError) -> String {
    format!("Analysis failed: {err}")
}

/// Run one submission end to end.
///
/// Inert when the draft is invalid or a submission is outstanding. On an
/// applied success the shared history version is bumped exactly once.
/// Returns `true` only in that case.
pub async fn submit<A, S, B>(client: &A, state: &S, bus: &B) -> bool
where
    A: RemoteAnalysisClient + ?Sized,
    S: StateCell<StructuredAnalysisController>,
    B: StateCell<SyncBus>,
{
    let pending = match state.update_with(StructuredAnalysisController::begin_submit) {
        Some(Ok(pending)) => pending,
        Some(Err(blocked)) => {
            tracing::debug!(?blocked, "structured submit ignored");
            return false;
        }
        None => return false,
    };

    let outcome = client.submit_analysis(&pending.draft).await;
    if let Err(e) = &outcome {
        tracing::debug!(error = %e, "structured analysis failed");
    }
    let succeeded = outcome.is_ok();

    let applied = state
        .update_with(|c| c.complete_submit(pending.ticket, outcome))
        .unwrap_or(false);
    if !applied {
        tracing::debug!("discarding stale structured analysis response");
        return false;
    }

    if succeeded {
        if let Some(version) = bus.update_with(SyncBus::bump) {
            tracing::debug!(version, "history version bumped");
        }
    }
    succeeded
}
