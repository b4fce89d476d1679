//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the upstream analysis client behind the `RemoteAnalysisClient` seam
//! so route tests can swap in a scripted upstream.

use std::sync::Arc;

use analysis::RemoteAnalysisClient;

#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<dyn RemoteAnalysisClient>,
}

impl AppState {
    #[must_use]
    pub fn new(analysis: Arc<dyn RemoteAnalysisClient>) -> Self {
        Self { analysis }
    }
}
