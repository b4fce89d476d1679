use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::error::ValidationError;
use crate::mock::{Call, MockClient, sample_item};
use crate::model::Priority;

fn filled_form() -> Rc<RefCell<StructuredAnalysisController>> {
    let mut form = StructuredAnalysisController::default();
    form.set_title("Vendor risk");
    form.set_description("Single supplier dependency");
    form.set_kind(AnalysisType::Risk);
    Rc::new(RefCell::new(form))
}

fn new_bus() -> Rc<RefCell<SyncBus>> {
    Rc::new(RefCell::new(SyncBus::default()))
}

// =============================================================
// Preconditions
// =============================================================

#[tokio::test]
async fn blank_fields_issue_no_request() {
    let client = MockClient::new();
    let bus = new_bus();
    let drafts = [("", "text"), ("title", ""), ("   ", "text"), ("title", " \n\t"), ("", "")];

    for (title, description) in drafts {
        let form = Rc::new(RefCell::new(StructuredAnalysisController::default()));
        form.borrow_mut().set_title(title);
        form.borrow_mut().set_description(description);
        assert!(!form.borrow().can_submit());
        assert!(!submit(&client, &form, &bus).await);
        assert_eq!(form.borrow().state(), &RequestState::Idle);
    }

    assert!(client.calls().is_empty());
    assert_eq!(bus.borrow().version(), 0);
}

#[test]
fn begin_submit_reports_validation_reason() {
    let mut form = StructuredAnalysisController::default();
    form.set_title("Vendor risk");
    assert_eq!(form.begin_submit(), Err(SubmitBlocked::Invalid(ValidationError::EmptyDescription)));
    assert!(!form.is_submitting());
}

// =============================================================
// Success / failure
// =============================================================

#[tokio::test]
async fn success_shows_result_and_bumps_version_once() {
    let client = MockClient::new();
    client.push_submit(Ok(sample_item(1)));
    let form = filled_form();
    let bus = new_bus();

    assert!(submit(&client, &form, &bus).await);

    let form = form.borrow();
    let result = form.result().unwrap();
    assert_eq!(result.id, 1);
    assert_eq!(result.category.as_deref(), Some("Supply Chain"));
    assert_eq!(result.impact_label(), "8/10");
    assert_eq!(result.probability_label(), "60.0%");
    assert_eq!(result.risk_score_label(), "4.80");
    assert_eq!(result.priority, Some(Priority::High));
    assert_eq!(bus.borrow().version(), 1);
    assert_eq!(
        client.calls(),
        vec![Call::Submit(SubmissionDraft::new("Vendor risk", "Single supplier dependency", AnalysisType::Risk))]
    );
}

#[tokio::test]
async fn success_keeps_draft_for_resubmission() {
    let client = MockClient::new();
    let form = filled_form();
    let bus = new_bus();

    assert!(submit(&client, &form, &bus).await);
    assert_eq!(form.borrow().draft().title, "Vendor risk");
    assert!(form.borrow().can_submit());

    assert!(submit(&client, &form, &bus).await);
    assert_eq!(client.count(|c| matches!(c, Call::Submit(_))), 2);
    assert_eq!(bus.borrow().version(), 2);
}

#[tokio::test]
async fn failure_shows_message_and_keeps_draft() {
    let client = MockClient::new();
    client.push_submit(Err(AnalysisError::remote(500, "scoring model offline")));
    let form = filled_form();
    let bus = new_bus();

    assert!(!submit(&client, &form, &bus).await);

    assert_eq!(form.borrow().error(), Some("Analysis failed: scoring model offline"));
    assert!(form.borrow().result().is_none());
    assert_eq!(form.borrow().draft().description, "Single supplier dependency");
    assert!(form.borrow().can_submit());
    assert_eq!(bus.borrow().version(), 0);
}

#[tokio::test]
async fn transport_failure_is_view_local() {
    let client = MockClient::new();
    client.push_submit(Err(AnalysisError::Transport("connection refused".to_owned())));
    let form = filled_form();
    let bus = new_bus();

    submit(&client, &form, &bus).await;
    assert_eq!(form.borrow().error(), Some("Analysis failed: connection refused"));
    assert_eq!(bus.borrow().version(), 0);
}

// =============================================================
// Concurrency / staleness
// =============================================================

#[tokio::test]
async fn resubmit_while_submitting_is_noop() {
    let (client, gate) = MockClient::gated();
    let form = filled_form();
    let bus = new_bus();

    let (first, second, ()) = tokio::join!(submit(&client, &form, &bus), submit(&client, &form, &bus), async {
        gate.add_permits(1);
    });

    assert!(first);
    assert!(!second);
    assert_eq!(client.calls().len(), 1);
    assert_eq!(bus.borrow().version(), 1);
}

#[tokio::test]
async fn reset_discards_in_flight_response() {
    let (client, gate) = MockClient::gated();
    let form = filled_form();
    let bus = new_bus();

    let (applied, ()) = tokio::join!(submit(&client, &form, &bus), async {
        form.borrow_mut().reset();
        gate.add_permits(1);
    });

    assert!(!applied);
    assert_eq!(form.borrow().state(), &RequestState::Idle);
    assert_eq!(form.borrow().draft(), &SubmissionDraft::default());
    assert_eq!(bus.borrow().version(), 0);
}

#[tokio::test]
async fn unmounted_form_ignores_response() {
    let (client, gate) = MockClient::gated();
    let owner = filled_form();
    let view = Rc::downgrade(&owner);
    let bus = new_bus();

    let (applied, ()) = tokio::join!(submit(&client, &view, &bus), async move {
        drop(owner);
        gate.add_permits(1);
    });

    assert!(!applied);
    assert_eq!(client.calls().len(), 1);
    assert_eq!(bus.borrow().version(), 0);
}
