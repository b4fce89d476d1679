//! Browser networking for the analysis service.

pub mod api;
