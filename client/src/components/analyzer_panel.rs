//! Structured ("AI") analysis form and its result panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form is the single writer of the history version: a successful
//! submission bumps it through `bus`, which makes the history panel refetch.

use analysis::structured::{self, RESULT_PLACEHOLDER, StructuredAnalysisController};
use analysis::{AnalysisItem, AnalysisType, SyncBus};
use leptos::prelude::*;

use crate::components::badge::{PriorityBadge, TypeBadge};
use crate::net::api::BrowserAnalysisClient;
use crate::state::cell::SignalCell;

#[component]
pub fn AnalyzerPanel(bus: WriteSignal<SyncBus>) -> impl IntoView {
    let form = RwSignal::new(StructuredAnalysisController::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        leptos::task::spawn_local(async move {
            structured::submit(&BrowserAnalysisClient, &SignalCell(form), &SignalCell(bus)).await;
        });
    };

    let kind_option = move |kind: AnalysisType| {
        view! {
            <label class="analyzer__kind">
                <input
                    type="radio"
                    name="analysis-type"
                    value=kind.as_str()
                    prop:checked=move || form.with(|f| f.draft().kind == kind)
                    on:change=move |_| form.update(|f| f.set_kind(kind))
                />
                {kind.label()}
            </label>
        }
    };

    view! {
        <section class="panel panel--analyzer">
            <h2 class="panel__title">"AI Analysis"</h2>
            <Show when=move || form.with(|f| f.error().is_some())>
                <p class="panel__error">{move || form.with(|f| f.error().unwrap_or_default().to_owned())}</p>
            </Show>
            <form class="analyzer__form" on:submit=on_submit>
                <label class="analyzer__label">
                    "Title"
                    <input
                        class="analyzer__input"
                        type="text"
                        placeholder="Enter analysis title"
                        prop:value=move || form.with(|f| f.draft().title.clone())
                        on:input=move |ev| form.update(|f| f.set_title(event_target_value(&ev)))
                    />
                </label>
                <fieldset class="analyzer__kinds">
                    <legend>"Analysis Type"</legend>
                    {kind_option(AnalysisType::Risk)}
                    {kind_option(AnalysisType::Opportunity)}
                </fieldset>
                <label class="analyzer__label">
                    "Description"
                    <textarea
                        class="analyzer__input"
                        rows="3"
                        placeholder="Describe the risk or opportunity in detail"
                        prop:value=move || form.with(|f| f.draft().description.clone())
                        on:input=move |ev| form.update(|f| f.set_description(event_target_value(&ev)))
                    ></textarea>
                </label>
                <div class="analyzer__actions">
                    <button
                        class="btn btn--primary"
                        type="submit"
                        disabled=move || !form.with(StructuredAnalysisController::can_submit)
                    >
                        {move || if form.with(StructuredAnalysisController::is_submitting) { "Analyzing..." } else { "AI Analyze" }}
                    </button>
                    <button class="btn" type="button" on:click=move |_| form.update(StructuredAnalysisController::reset)>
                        "Reset"
                    </button>
                </div>
            </form>
            <div class="panel__result">
                <h3>"AI Analysis Result"</h3>
                {move || match form.with(|f| f.result().cloned()) {
                    Some(item) => view! { <AnalysisResult item=item/> }.into_any(),
                    None => view! { <p class="panel__placeholder">{RESULT_PLACEHOLDER}</p> }.into_any(),
                }}
            </div>
        </section>
    }
}

/// Scored item returned by the last successful submission.
#[component]
fn AnalysisResult(item: AnalysisItem) -> impl IntoView {
    let mitigation = item.mitigation_strategy.clone().filter(|s| !s.trim().is_empty());
    let exploitation = item.exploitation_plan.clone().filter(|s| !s.trim().is_empty());

    view! {
        <div class="result">
            <div class="result__header">
                <span class="result__title">{item.title.clone()}</span>
                <TypeBadge kind=item.kind/>
                <PriorityBadge priority=item.priority/>
            </div>
            <dl class="result__scores">
                <dt>"Category"</dt>
                <dd>{item.category.clone().unwrap_or_default()}</dd>
                <dt>"Impact"</dt>
                <dd>{item.impact_label()}</dd>
                <dt>"Probability"</dt>
                <dd>{item.probability_label()}</dd>
                <dt>"Risk Score"</dt>
                <dd>{item.risk_score_label()}</dd>
            </dl>
            <p class="result__analysis">{item.ai_analysis.clone().unwrap_or_default()}</p>
            {mitigation.map(|text| view! { <p class="result__plan"><strong>"Mitigation: "</strong>{text}</p> })}
            {exploitation.map(|text| view! { <p class="result__plan"><strong>"Exploitation: "</strong>{text}</p> })}
        </div>
    }
}
