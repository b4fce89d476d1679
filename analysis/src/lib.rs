//! Orchestration core for the risk & opportunity analyst views.
//!
//! This crate owns everything the three panels agree on: the wire model of the
//! remote analysis service, the error taxonomy, the `RemoteAnalysisClient`
//! seam, and the per-view controllers. It has no UI framework dependency so
//! the controllers can be driven from Leptos signals in the browser and from
//! plain `Rc<RefCell<_>>` cells in tests.
//!
//! DESIGN
//! ======
//! Controllers are synchronous state machines. Starting a request hands out a
//! ticket; completing it requires the same ticket back, which is how stale and
//! duplicate responses are rejected. The async drivers in each controller
//! module glue a client call between those two steps and only touch state
//! through a [`cell::StateCell`], so a view that has been torn down simply
//! stops receiving updates.

pub mod api;
pub mod bus;
pub mod cell;
pub mod config;
pub mod error;
pub mod history;
#[cfg(feature = "http")]
pub mod http;
pub mod model;
pub mod rag;
pub mod request;
pub mod structured;

#[cfg(test)]
pub(crate) mod mock;

pub use api::RemoteAnalysisClient;
pub use bus::SyncBus;
pub use error::{AnalysisError, ValidationError};
pub use model::{AnalysisItem, AnalysisType, Priority, RagStatus, SubmissionDraft};
