//! Scripted [`RemoteAnalysisClient`] for controller tests.
//!
//! Every call is recorded. Responses are popped from per-operation queues and
//! fall back to a benign default when a queue is empty. An optional gate
//! holds every call until the test releases permits, which is how tests keep
//! a request outstanding.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;

use crate::api::RemoteAnalysisClient;
use crate::error::AnalysisError;
use crate::model::{AnalysisItem, AnalysisType, Priority, RagStatus, SubmissionDraft};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Submit(SubmissionDraft),
    List,
    Delete(i64),
    RagQuery(String),
    RagStatus,
}

type Queue<T> = Mutex<VecDeque<Result<T, AnalysisError>>>;

#[derive(Default)]
pub struct MockClient {
    calls: Mutex<Vec<Call>>,
    submit: Queue<AnalysisItem>,
    list: Queue<Vec<AnalysisItem>>,
    delete: Queue<()>,
    rag: Queue<String>,
    status: Queue<RagStatus>,
    gate: Option<Arc<Semaphore>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every call until the returned semaphore gets a permit.
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        (Self { gate: Some(gate.clone()), ..Self::default() }, gate)
    }

    pub fn push_submit(&self, outcome: Result<AnalysisItem, AnalysisError>) {
        self.submit.lock().unwrap().push_back(outcome);
    }

    pub fn push_list(&self, outcome: Result<Vec<AnalysisItem>, AnalysisError>) {
        self.list.lock().unwrap().push_back(outcome);
    }

    pub fn push_delete(&self, outcome: Result<(), AnalysisError>) {
        self.delete.lock().unwrap().push_back(outcome);
    }

    pub fn push_rag(&self, outcome: Result<String, AnalysisError>) {
        self.rag.lock().unwrap().push_back(outcome);
    }

    pub fn push_status(&self, outcome: Result<RagStatus, AnalysisError>) {
        self.status.lock().unwrap().push_back(outcome);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    pub fn list_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::List))
    }

    async fn enter(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
    }
}

fn pop<T>(queue: &Queue<T>, default: impl FnOnce() -> T) -> Result<T, AnalysisError> {
    queue.lock().unwrap().pop_front().unwrap_or_else(|| Ok(default()))
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl RemoteAnalysisClient for MockClient {
    async fn submit_analysis(&self, draft: &SubmissionDraft) -> Result<AnalysisItem, AnalysisError> {
        self.enter(Call::Submit(draft.clone())).await;
        pop(&self.submit, || sample_item(1))
    }

    async fn list_history(&self) -> Result<Vec<AnalysisItem>, AnalysisError> {
        self.enter(Call::List).await;
        pop(&self.list, Vec::new)
    }

    async fn delete_analysis(&self, id: i64) -> Result<(), AnalysisError> {
        self.enter(Call::Delete(id)).await;
        pop(&self.delete, || ())
    }

    async fn submit_rag_query(&self, text: &str) -> Result<String, AnalysisError> {
        self.enter(Call::RagQuery(text.to_owned())).await;
        pop(&self.rag, || "answer".to_owned())
    }

    async fn fetch_rag_status(&self) -> Result<RagStatus, AnalysisError> {
        self.enter(Call::RagStatus).await;
        pop(&self.status, || RagStatus { document_count: 3, status: "active".to_owned(), ..RagStatus::default() })
    }
}

/// The scored item from the vendor-risk walkthrough, with the given id.
pub fn sample_item(id: i64) -> AnalysisItem {
    AnalysisItem {
        id,
        title: "Vendor risk".to_owned(),
        description: "Single supplier dependency".to_owned(),
        kind: AnalysisType::Risk,
        category: Some("Supply Chain".to_owned()),
        impact_score: Some(8.0),
        probability: Some(0.6),
        risk_score: Some(4.8),
        priority: Some(Priority::High),
        created_at: Some("2025-03-14T09:30:00.123456".to_owned()),
        updated_at: None,
        ai_analysis: Some("Concentration risk in a single supplier.".to_owned()),
        mitigation_strategy: None,
        exploitation_plan: None,
    }
}

pub fn not_found() -> AnalysisError {
    AnalysisError::remote(404, "Analysis 99 not found")
}
