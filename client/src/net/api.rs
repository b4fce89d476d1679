//! Browser implementation of [`RemoteAnalysisClient`].
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against the
//! same-origin proxy, so every URL is relative.
//! Server-side (SSR): stubs returning a transport error since these calls
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is folded into [`AnalysisError`] so the controllers render
//! one message shape regardless of where the call failed.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use analysis::api::RemoteAnalysisClient;
use analysis::{AnalysisError, AnalysisItem, RagStatus, SubmissionDraft};
#[cfg(feature = "hydrate")]
use analysis::api::{
    analyze_endpoint, check_status, decode_json, delete_endpoint, history_endpoint, rag_query_endpoint,
    rag_status_endpoint, require_query,
};

/// Same-origin base for every endpoint.
#[cfg(feature = "hydrate")]
const SAME_ORIGIN: &str = "";

/// Stateless handle; every call is a single `fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserAnalysisClient;

#[cfg(not(feature = "hydrate"))]
fn unavailable() -> AnalysisError {
    AnalysisError::Transport("not available on server".to_owned())
}

#[cfg(feature = "hydrate")]
fn transport(err: gloo_net::Error) -> AnalysisError {
    AnalysisError::Transport(err.to_string())
}

#[cfg(feature = "hydrate")]
async fn success_body(resp: gloo_net::http::Response) -> Result<String, AnalysisError> {
    let status = resp.status();
    let text = resp.text().await.map_err(transport)?;
    check_status(status, text)
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl RemoteAnalysisClient for BrowserAnalysisClient {
    async fn submit_analysis(&self, draft: &SubmissionDraft) -> Result<AnalysisItem, AnalysisError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&analyze_endpoint(SAME_ORIGIN))
                .json(draft)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            let body = success_body(resp).await?;
            decode_json(&body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = draft;
            Err(unavailable())
        }
    }

    async fn list_history(&self) -> Result<Vec<AnalysisItem>, AnalysisError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&history_endpoint(SAME_ORIGIN))
                .send()
                .await
                .map_err(transport)?;
            let body = success_body(resp).await?;
            decode_json(&body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable())
        }
    }

    async fn delete_analysis(&self, id: i64) -> Result<(), AnalysisError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::delete(&delete_endpoint(SAME_ORIGIN, id))
                .send()
                .await
                .map_err(transport)?;
            success_body(resp).await.map(drop)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(unavailable())
        }
    }

    async fn submit_rag_query(&self, text: &str) -> Result<String, AnalysisError> {
        #[cfg(feature = "hydrate")]
        {
            let text = require_query(text)?;
            let resp = gloo_net::http::Request::post(&rag_query_endpoint(SAME_ORIGIN))
                .header("Content-Type", "text/plain")
                .body(text.to_owned())
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            success_body(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = text;
            Err(unavailable())
        }
    }

    async fn fetch_rag_status(&self) -> Result<RagStatus, AnalysisError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&rag_status_endpoint(SAME_ORIGIN))
                .send()
                .await
                .map_err(transport)?;
            let body = success_body(resp).await?;
            decode_json(&body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable())
        }
    }
}
