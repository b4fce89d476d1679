//! # client
//!
//! Leptos + WASM frontend for the risk and opportunity analyst.
//!
//! This crate renders the three panels (structured analysis form, analysis
//! history, RAG query box) and binds them to the framework-free controllers in
//! the `analysis` crate. Network access goes through
//! [`net::api::BrowserAnalysisClient`], which talks to the same-origin proxy
//! the `server` crate exposes.
//!
//! DESIGN
//! ======
//! Views never mutate controller state directly from async code; they hand a
//! [`state::cell::SignalCell`] to the shared drivers. Once a view is unmounted
//! its signals are disposed and any late response is discarded.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
