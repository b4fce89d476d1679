//! Top-level routed pages.

pub mod analyst;
