//! Free-text RAG query box with the corpus status chips.
//!
//! SYSTEM CONTEXT
//! ==============
//! Polls the corpus status once on mount and again after every answered
//! query. Queries never touch the history version.

use analysis::rag::{self, KeyAction, RESULT_PLACEHOLDER, RagAnalysisController};
use leptos::prelude::*;

use crate::net::api::BrowserAnalysisClient;
use crate::state::cell::SignalCell;

#[component]
pub fn RagPanel() -> impl IntoView {
    let panel = RwSignal::new(RagAnalysisController::default());

    Effect::new(move || {
        leptos::task::spawn_local(async move {
            rag::poll_status(&BrowserAnalysisClient, &SignalCell(panel)).await;
        });
    });

    let send = move || {
        leptos::task::spawn_local(async move {
            rag::run_query(&BrowserAnalysisClient, &SignalCell(panel)).await;
        });
    };

    view! {
        <section class="panel panel--rag">
            <h2 class="panel__title">"RAG Analysis"</h2>
            <div class="rag__status">
                <span class="chip">
                    {move || format!("Documents: {}", panel.with(|p| p.status().document_count))}
                </span>
                <span class=move || {
                    if panel.with(|p| p.status().is_active()) { "chip chip--active" } else { "chip chip--inactive" }
                }>{move || format!("Status: {}", panel.with(|p| p.status().status.to_uppercase()))}</span>
            </div>
            <Show when=move || panel.with(|p| p.error().is_some())>
                <p class="panel__error">{move || panel.with(|p| p.error().unwrap_or_default().to_owned())}</p>
            </Show>
            <textarea
                class="rag__input"
                rows="4"
                placeholder="Ask about risks and opportunities in the indexed documents"
                prop:value=move || panel.with(|p| p.query().to_owned())
                on:input=move |ev| panel.update(|p| p.set_query(event_target_value(&ev)))
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    match rag::key_action(&ev.key(), ev.shift_key()) {
                        KeyAction::Submit => {
                            ev.prevent_default();
                            send();
                        }
                        KeyAction::Newline | KeyAction::Passthrough => {}
                    }
                }
            ></textarea>
            <button
                class="btn btn--primary"
                disabled=move || !panel.with(RagAnalysisController::can_submit)
                on:click=move |_| send()
            >
                {move || if panel.with(RagAnalysisController::is_submitting) { "Analyzing..." } else { "RAG Analyze" }}
            </button>
            <div class="panel__result">
                <h3>"RAG Analysis Result"</h3>
                {move || match panel.with(|p| p.result().map(str::to_owned)) {
                    Some(text) => view! { <pre class="rag__result">{text}</pre> }.into_any(),
                    None => view! { <p class="panel__placeholder">{RESULT_PLACEHOLDER}</p> }.into_any(),
                }}
            </div>
        </section>
    }
}
