//! Same-origin proxy for the remote analysis service.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only talks to this server. Each handler forwards exactly one
//! call to the upstream client and relays the outcome; nothing is retried,
//! cached, or merged here.
//!
//! ERROR HANDLING
//! ==============
//! Upstream status codes pass through with the upstream message as body.
//! Failures that never produced an upstream status (connection, bad payload)
//! become `502 Bad Gateway`.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use analysis::{AnalysisError, AnalysisItem, RagStatus, SubmissionDraft};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json, Response};

use crate::state::AppState;

/// `POST /api/risk-opportunity/analyze`: score one draft.
pub async fn analyze(
    State(state): State<AppState>,
    Json(draft): Json<SubmissionDraft>,
) -> Result<Json<AnalysisItem>, Response> {
    state
        .analysis
        .submit_analysis(&draft)
        .await
        .map(Json)
        .map_err(analysis_error_to_response)
}

/// `GET /api/risk-opportunity`: every stored analysis in upstream order.
pub async fn list_history(State(state): State<AppState>) -> Result<Json<Vec<AnalysisItem>>, Response> {
    state
        .analysis
        .list_history()
        .await
        .map(Json)
        .map_err(analysis_error_to_response)
}

/// `DELETE /api/risk-opportunity/{id}`.
pub async fn delete_analysis(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, Response> {
    state
        .analysis
        .delete_analysis(id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(analysis_error_to_response)
}

/// `POST /api/risk-opportunity/rag-analysis`: plain-text question in,
/// plain-text answer out.
pub async fn rag_query(State(state): State<AppState>, body: String) -> Result<Response, Response> {
    let answer = state
        .analysis
        .submit_rag_query(&body)
        .await
        .map_err(analysis_error_to_response)?;
    Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], answer).into_response())
}

/// `GET /api/risk-opportunity/rag-status`.
pub async fn rag_status(State(state): State<AppState>) -> Result<Json<RagStatus>, Response> {
    state
        .analysis
        .fetch_rag_status()
        .await
        .map(Json)
        .map_err(analysis_error_to_response)
}

pub(crate) fn analysis_error_status(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::Validation(_) => StatusCode::BAD_REQUEST,
        AnalysisError::Remote { status, .. } => StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
        AnalysisError::Transport(_) | AnalysisError::Decode(_) => StatusCode::BAD_GATEWAY,
    }
}

fn analysis_error_to_response(err: AnalysisError) -> Response {
    let status = analysis_error_status(&err);
    if status.is_server_error() {
        tracing::warn!(%status, error = %err, "analysis upstream call failed");
    } else {
        tracing::debug!(%status, error = %err, "analysis upstream call rejected");
    }
    (status, err.to_string()).into_response()
}
