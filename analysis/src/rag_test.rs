use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::error::ValidationError;
use crate::mock::{Call, MockClient};

fn panel_with(query: &str) -> Rc<RefCell<RagAnalysisController>> {
    let mut panel = RagAnalysisController::default();
    panel.set_query(query);
    Rc::new(RefCell::new(panel))
}

// =============================================================
// Key handling
// =============================================================

#[test]
fn plain_enter_submits() {
    assert_eq!(key_action("Enter", false), KeyAction::Submit);
}

#[test]
fn shift_enter_inserts_newline() {
    assert_eq!(key_action("Enter", true), KeyAction::Newline);
}

#[test]
fn other_keys_pass_through() {
    assert_eq!(key_action("a", false), KeyAction::Passthrough);
    assert_eq!(key_action("Tab", true), KeyAction::Passthrough);
}

// =============================================================
// Preconditions
// =============================================================

#[tokio::test]
async fn blank_query_issues_no_request() {
    let client = MockClient::new();
    for query in ["", "   ", "\n\n"] {
        let panel = panel_with(query);
        assert!(!panel.borrow().can_submit());
        assert!(!run_query(&client, &panel).await);
        assert_eq!(panel.borrow().state(), &RequestState::Idle);
    }
    assert!(client.calls().is_empty());
}

#[test]
fn begin_query_reports_empty_query() {
    let mut panel = RagAnalysisController::default();
    assert_eq!(panel.begin_query(), Err(SubmitBlocked::Invalid(ValidationError::EmptyQuery)));
}

// =============================================================
// Query flow
// =============================================================

#[tokio::test]
async fn success_stores_answer_then_polls_status() {
    let client = MockClient::new();
    client.push_rag(Ok("Diversify suppliers.".to_owned()));
    let panel = panel_with("How do I reduce vendor risk?");

    assert!(run_query(&client, &panel).await);

    assert_eq!(panel.borrow().result(), Some("Diversify suppliers."));
    assert_eq!(panel.borrow().status().document_count, 3);
    assert_eq!(
        client.calls(),
        vec![Call::RagQuery("How do I reduce vendor risk?".to_owned()), Call::RagStatus]
    );
}

#[tokio::test]
async fn failure_shows_message_and_still_polls_status() {
    let client = MockClient::new();
    client.push_rag(Err(AnalysisError::remote(503, "vector store unavailable")));
    let panel = panel_with("anything");

    assert!(!run_query(&client, &panel).await);

    assert_eq!(panel.borrow().error(), Some("Analysis failed: vector store unavailable"));
    assert!(panel.borrow().result().is_none());
    assert_eq!(client.count(|c| matches!(c, Call::RagStatus)), 1);
    assert!(panel.borrow().can_submit());
}

#[tokio::test]
async fn new_query_clears_previous_answer() {
    let (client, gate) = MockClient::gated();
    let panel = panel_with("first");
    gate.add_permits(2);
    run_query(&client, &panel).await;
    assert_eq!(panel.borrow().result(), Some("answer"));

    panel.borrow_mut().set_query("second");
    let (_, ()) = tokio::join!(run_query(&client, &panel), async {
        assert!(panel.borrow().result().is_none());
        assert!(panel.borrow().is_submitting());
        gate.add_permits(2);
    });
    assert_eq!(panel.borrow().result(), Some("answer"));
}

#[tokio::test]
async fn resubmit_while_submitting_is_noop() {
    let (client, gate) = MockClient::gated();
    let panel = panel_with("question");

    let (first, second, ()) = tokio::join!(run_query(&client, &panel), run_query(&client, &panel), async {
        gate.add_permits(2);
    });

    assert!(first);
    assert!(!second);
    assert_eq!(client.count(|c| matches!(c, Call::RagQuery(_))), 1);
}

#[tokio::test]
async fn unmounted_panel_ignores_answer_and_skips_poll() {
    let (client, gate) = MockClient::gated();
    let owner = panel_with("question");
    let view = Rc::downgrade(&owner);

    let (stored, ()) = tokio::join!(run_query(&client, &view), async move {
        drop(owner);
        gate.add_permits(1);
    });

    assert!(!stored);
    assert_eq!(client.calls(), vec![Call::RagQuery("question".to_owned())]);
}

// =============================================================
// Status polling
// =============================================================

#[tokio::test]
async fn poll_replaces_snapshot() {
    let client = MockClient::new();
    client.push_status(Ok(RagStatus { document_count: 42, status: "active".to_owned(), ..RagStatus::default() }));
    let panel = panel_with("");

    assert!(poll_status(&client, &panel).await);
    assert_eq!(panel.borrow().status().document_count, 42);
    assert!(panel.borrow().status().is_active());
}

#[tokio::test]
async fn poll_failure_is_swallowed() {
    let client = MockClient::new();
    client.push_status(Ok(RagStatus { document_count: 5, status: "active".to_owned(), ..RagStatus::default() }));
    client.push_status(Err(AnalysisError::Transport("offline".to_owned())));
    let panel = panel_with("");

    poll_status(&client, &panel).await;
    assert!(!poll_status(&client, &panel).await);

    let panel = panel.borrow();
    assert_eq!(panel.status().document_count, 5);
    assert!(panel.error().is_none());
    assert_eq!(panel.state(), &RequestState::Idle);
}

#[tokio::test]
async fn poll_runs_alongside_query() {
    let (client, gate) = MockClient::gated();
    let panel = panel_with("question");

    let (stored, polled, ()) = tokio::join!(run_query(&client, &panel), poll_status(&client, &panel), async {
        gate.add_permits(3);
    });

    assert!(stored);
    assert!(polled);
    assert_eq!(client.calls()[..2], [Call::RagQuery("question".to_owned()), Call::RagStatus]);
}

#[test]
fn overlapping_polls_collapse_into_one_follow_up() {
    let mut panel = RagAnalysisController::default();
    let first = panel.begin_status_poll().unwrap();
    assert!(panel.begin_status_poll().is_none());
    assert!(panel.begin_status_poll().is_none());
    assert!(panel.take_queued_poll().is_none());

    assert!(panel.complete_status_poll(first, Ok(RagStatus::default())));
    assert!(panel.take_queued_poll().is_some());
    assert!(panel.take_queued_poll().is_none());
}

#[tokio::test]
async fn query_finishing_during_mount_poll_still_refreshes_status() {
    let (client, gate) = MockClient::gated();
    client.push_status(Ok(RagStatus::default()));
    client.push_status(Ok(RagStatus { document_count: 12, status: "active".to_owned(), ..RagStatus::default() }));
    let panel = panel_with("question");

    let (stored, polled, ()) = tokio::join!(run_query(&client, &panel), poll_status(&client, &panel), async {
        // The query is first in line at the gate; let only it through.
        gate.add_permits(1);
        while panel.borrow().result().is_none() {
            tokio::task::yield_now().await;
        }
        gate.add_permits(2);
    });

    assert!(stored);
    assert!(polled);
    assert_eq!(
        client.calls(),
        vec![Call::RagQuery("question".to_owned()), Call::RagStatus, Call::RagStatus]
    );
    assert_eq!(panel.borrow().status().document_count, 12);
    assert!(panel.borrow().status().is_active());
}
