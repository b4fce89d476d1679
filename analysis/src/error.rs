//! Error taxonomy shared by the client implementations and controllers.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// A local precondition failed. Never reaches the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
    #[error("description is required")]
    EmptyDescription,
    #[error("query is required")]
    EmptyQuery,
}

/// Errors produced by [`crate::RemoteAnalysisClient`] operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Rejected locally before any request was issued.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service could not be reached.
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-2xx status. `message` is the response
    /// body as sent by the service.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// A 2xx body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl AnalysisError {
    /// Build a [`AnalysisError::Remote`] from a failed response.
    ///
    /// The body is kept verbatim; an empty body falls back to the status code.
    #[must_use]
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() { format!("request failed: {status}") } else { body };
        Self::Remote { status, message }
    }

    /// `true` for failures that happened before a request was sent.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status carried by a remote failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
