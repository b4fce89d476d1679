//! `reqwest` implementation of [`RemoteAnalysisClient`] for native callers.
//!
//! Thin HTTP wrapper: one request per call, status and body handed back
//! through [`AnalysisError`]. The inherent methods are `Send` so Axum handlers
//! can await them directly; the trait impl delegates to them.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::api::{
    RemoteAnalysisClient, analyze_endpoint, check_status, decode_json, delete_endpoint, history_endpoint, rag_query_endpoint,
    rag_status_endpoint, require_query,
};
use crate::config::ServiceConfig;
use crate::error::AnalysisError;
use crate::model::{AnalysisItem, RagStatus, SubmissionDraft};

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone, Debug)]
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// Build a client for the configured service.
    ///
    /// No request timeout is installed; only connection establishment is bounded.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Transport(format!("http client build failed: {e}")))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a draft for scoring.
    ///
    /// # Errors
    ///
    /// Transport, remote, or decode failure.
    pub async fn analyze(&self, draft: &SubmissionDraft) -> Result<AnalysisItem, AnalysisError> {
        let url = analyze_endpoint(&self.base_url);
        tracing::debug!(%url, kind = draft.kind.as_str(), "submitting analysis");
        let response = self.http.post(&url).json(draft).send().await.map_err(transport)?;
        let body = success_body(response).await?;
        decode_json(&body)
    }

    /// Fetch every stored analysis in service order.
    ///
    /// # Errors
    ///
    /// Transport, remote, or decode failure.
    pub async fn history(&self) -> Result<Vec<AnalysisItem>, AnalysisError> {
        let url = history_endpoint(&self.base_url);
        tracing::debug!(%url, "listing history");
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let body = success_body(response).await?;
        decode_json(&body)
    }

    /// Delete one stored analysis.
    ///
    /// # Errors
    ///
    /// Transport or remote failure (`404` when the id is unknown).
    pub async fn delete(&self, id: i64) -> Result<(), AnalysisError> {
        let url = delete_endpoint(&self.base_url, id);
        tracing::debug!(%url, id, "deleting analysis");
        let response = self.http.delete(&url).send().await.map_err(transport)?;
        success_body(response).await.map(drop)
    }

    /// Ask a free-text question against the document corpus.
    ///
    /// # Errors
    ///
    /// Validation failure for blank text (no request is sent), otherwise
    /// transport or remote failure.
    pub async fn rag_query(&self, text: &str) -> Result<String, AnalysisError> {
        let text = require_query(text)?;
        let url = rag_query_endpoint(&self.base_url);
        tracing::debug!(%url, len = text.len(), "submitting rag query");
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "text/plain")
            .body(text.to_owned())
            .send()
            .await
            .map_err(transport)?;
        success_body(response).await
    }

    /// Fetch the current corpus status.
    ///
    /// # Errors
    ///
    /// Transport, remote, or decode failure.
    pub async fn rag_status(&self) -> Result<RagStatus, AnalysisError> {
        let url = rag_status_endpoint(&self.base_url);
        tracing::debug!(%url, "fetching rag status");
        let response = self.http.get(&url).send().await.map_err(transport)?;
        let body = success_body(response).await?;
        decode_json(&body)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl RemoteAnalysisClient for HttpAnalysisClient {
    async fn submit_analysis(&self, draft: &SubmissionDraft) -> Result<AnalysisItem, AnalysisError> {
        self.analyze(draft).await
    }

    async fn list_history(&self) -> Result<Vec<AnalysisItem>, AnalysisError> {
        self.history().await
    }

    async fn delete_analysis(&self, id: i64) -> Result<(), AnalysisError> {
        self.delete(id).await
    }

    async fn submit_rag_query(&self, text: &str) -> Result<String, AnalysisError> {
        self.rag_query(text).await
    }

    async fn fetch_rag_status(&self) -> Result<RagStatus, AnalysisError> {
        self.rag_status().await
    }
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

fn transport(err: reqwest::Error) -> AnalysisError {
    AnalysisError::Transport(err.to_string())
}

async fn success_body(response: reqwest::Response) -> Result<String, AnalysisError> {
    let status = response.status().as_u16();
    let text = response.text().await.map_err(transport)?;
    check_status(status, text)
}
