//! The remote analysis service boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! Five operations, none retried, none cached. Implementations exist for the
//! browser (`gloo-net`, in the `client` crate) and for native callers
//! (`reqwest`, in [`crate::http`]). Both build URLs with the helpers below so
//! the paths are defined once.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::error::{AnalysisError, ValidationError};
use crate::model::{AnalysisItem, RagStatus, SubmissionDraft};

/// Path prefix shared by every operation.
pub const API_PREFIX: &str = "/api/risk-opportunity";

/// Typed wrapper over the remote analysis service.
///
/// Implementations must not retry, cache, or pre-validate anything beyond
/// [`require_query`]; every call is a single request whose outcome is handed
/// back verbatim.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait RemoteAnalysisClient: Send + Sync {
    /// `POST /api/risk-opportunity/analyze`.
    async fn submit_analysis(&self, draft: &SubmissionDraft) -> Result<AnalysisItem, AnalysisError>;

    /// `GET /api/risk-opportunity`. An empty list is a success.
    async fn list_history(&self) -> Result<Vec<AnalysisItem>, AnalysisError>;

    /// `DELETE /api/risk-opportunity/{id}`.
    async fn delete_analysis(&self, id: i64) -> Result<(), AnalysisError>;

    /// `POST /api/risk-opportunity/rag-analysis` with a plain-text body.
    async fn submit_rag_query(&self, text: &str) -> Result<String, AnalysisError>;

    /// `GET /api/risk-opportunity/rag-status`.
    async fn fetch_rag_status(&self) -> Result<RagStatus, AnalysisError>;
}

#[must_use]
pub fn analyze_endpoint(base: &str) -> String {
    format!("{base}{API_PREFIX}/analyze")
}

#[must_use]
pub fn history_endpoint(base: &str) -> String {
    format!("{base}{API_PREFIX}")
}

#[must_use]
pub fn delete_endpoint(base: &str, id: i64) -> String {
    format!("{base}{API_PREFIX}/{id}")
}

#[must_use]
pub fn rag_query_endpoint(base: &str) -> String {
    format!("{base}{API_PREFIX}/rag-analysis")
}

#[must_use]
pub fn rag_status_endpoint(base: &str) -> String {
    format!("{base}{API_PREFIX}/rag-status")
}

/// Reject blank RAG queries before any request is built.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyQuery`] for empty or whitespace-only text.
pub fn require_query(text: &str) -> Result<&str, ValidationError> {
    if text.trim().is_empty() { Err(ValidationError::EmptyQuery) } else { Ok(text) }
}

/// Decode a JSON success body, mapping shape mismatches to [`AnalysisError::Decode`].
///
/// # Errors
///
/// Returns [`AnalysisError::Decode`] when `body` does not parse as `T`.
pub fn decode_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, AnalysisError> {
    serde_json::from_str(body).map_err(|e| AnalysisError::Decode(e.to_string()))
}

/// Split a response into its success body or [`AnalysisError::Remote`].
///
/// # Errors
///
/// Returns [`AnalysisError::Remote`] for any non-2xx `status`.
pub fn check_status(status: u16, body: String) -> Result<String, AnalysisError> {
    if (200..300).contains(&status) { Ok(body) } else { Err(AnalysisError::remote(status, body)) }
}
