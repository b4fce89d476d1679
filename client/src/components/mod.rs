//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each panel owns its controller in a local `RwSignal` and drives it through
//! the `analysis` drivers. The only state shared between panels is the
//! history version handed down by the page.

pub mod analyzer_panel;
pub mod badge;
pub mod history_panel;
pub mod rag_panel;
