//! The analyst workspace: structured form, history, and RAG panels.
//!
//! SYSTEM CONTEXT
//! ==============
//! This page is the composing shell. It owns the history version and hands
//! the write half to the analyzer and the read half to the history list, so
//! neither panel knows the other exists.

use analysis::SyncBus;
use leptos::prelude::*;

use crate::components::analyzer_panel::AnalyzerPanel;
use crate::components::history_panel::HistoryPanel;
use crate::components::rag_panel::RagPanel;

#[component]
pub fn AnalystPage() -> impl IntoView {
    let (version, set_version) = signal(SyncBus::default());

    view! {
        <div class="analyst-page">
            <header class="analyst-page__header toolbar">
                <span class="toolbar__title">"Risk & Opportunity AI RAG Analyst"</span>
            </header>
            <main class="analyst-page__grid">
                <AnalyzerPanel bus=set_version/>
                <RagPanel/>
                <HistoryPanel version=version/>
            </main>
        </div>
    }
}
