//! Analysis history table with details disclosure and confirmed deletes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the history version owned by the page. The list refetches on mount
//! and whenever the version moves; deletes always end in a refetch. Rows are
//! rendered straight from the last successful fetch.

use analysis::history::{self, CONFIRM_DELETE_MESSAGE, EMPTY_MESSAGE, HistoryController};
use analysis::{AnalysisItem, SyncBus};
use leptos::prelude::*;

use crate::components::badge::{PriorityBadge, TypeBadge};
use crate::net::api::BrowserAnalysisClient;
use crate::state::cell::SignalCell;

#[component]
pub fn HistoryPanel(version: ReadSignal<SyncBus>) -> impl IntoView {
    let list = RwSignal::new(HistoryController::default());

    Effect::new(move || {
        let current = version.get().version();
        leptos::task::spawn_local(async move {
            history::sync(&BrowserAnalysisClient, &SignalCell(list), current).await;
        });
    });

    let on_retry = move |_| {
        leptos::task::spawn_local(async move {
            history::refresh(&BrowserAnalysisClient, &SignalCell(list)).await;
        });
    };
    let on_delete_request = Callback::new(move |id: i64| list.update(|h| h.request_delete(id)));
    let on_details = Callback::new(move |id: i64| list.update(|h| h.toggle_details(id)));
    let on_delete_cancel = Callback::new(move |()| list.update(HistoryController::cancel_delete));

    view! {
        <section class="panel panel--history">
            <h2 class="panel__title">"Analysis History"</h2>
            <Show when=move || list.with(|h| h.fetch_error().is_some())>
                <p class="panel__error">
                    {move || list.with(|h| h.fetch_error().unwrap_or_default().to_owned())}
                    <button class="btn btn--link" on:click=on_retry>
                        "Retry"
                    </button>
                </p>
            </Show>
            <Show when=move || list.with(|h| h.delete_error().is_some())>
                <p class="panel__error">{move || list.with(|h| h.delete_error().unwrap_or_default().to_owned())}</p>
            </Show>
            <Show
                when=move || !list.with(HistoryController::is_loading)
                fallback=move || view! { <p class="panel__loading">"Loading analyses..."</p> }
            >
                <Show
                    when=move || !list.with(HistoryController::shows_empty_state)
                    fallback=move || view! { <p class="panel__empty">{EMPTY_MESSAGE}</p> }
                >
                    <table class="history__table">
                        <thead>
                            <tr>
                                <th>"Title"</th>
                                <th>"Type"</th>
                                <th>"Category"</th>
                                <th>"Impact"</th>
                                <th>"Probability"</th>
                                <th>"Risk Score"</th>
                                <th>"Priority"</th>
                                <th>"Date"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                list.with(|h| h.items().to_vec())
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <HistoryRow
                                                item=item
                                                on_details=on_details
                                                on_delete=on_delete_request
                                            />
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </tbody>
                    </table>
                    <p class="history__total">{move || format!("Total analysis: {}", list.with(|h| h.items().len()))}</p>
                </Show>
            </Show>
            {move || {
                list.with(|h| h.details().cloned())
                    .map(|item| {
                        view! {
                            <div class="history__details">
                                <h3>{item.title.clone()}</h3>
                                <pre class="history__details-text">{item.details_text()}</pre>
                            </div>
                        }
                    })
            }}
            <Show when=move || list.with(|h| h.confirming().is_some())>
                <DeleteAnalysisDialog list=list on_cancel=on_delete_cancel/>
            </Show>
        </section>
    }
}

#[component]
fn HistoryRow(item: AnalysisItem, on_details: Callback<i64>, on_delete: Callback<i64>) -> impl IntoView {
    let id = item.id;
    view! {
        <tr class="history__row">
            <td>{item.title.clone()}</td>
            <td>
                <TypeBadge kind=item.kind/>
            </td>
            <td>{item.category.clone().unwrap_or_default()}</td>
            <td>{item.impact_value()}</td>
            <td>{item.probability_label()}</td>
            <td>{item.risk_score_label()}</td>
            <td>
                <PriorityBadge priority=item.priority/>
            </td>
            <td>{item.created_date().to_owned()}</td>
            <td class="history__actions">
                <button class="btn btn--link" title="View details" on:click=move |_| on_details.run(id)>
                    "View"
                </button>
                <button class="btn btn--link btn--danger" title="Delete" on:click=move |_| on_delete.run(id)>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

/// Second step of a delete. Nothing is sent until "Delete" is clicked here.
#[component]
fn DeleteAnalysisDialog(list: RwSignal<HistoryController>, on_cancel: Callback<()>) -> impl IntoView {
    let submit = move |_| {
        leptos::task::spawn_local(async move {
            history::confirm_delete(&BrowserAnalysisClient, &SignalCell(list)).await;
        });
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Delete Analysis"</h2>
                <p class="dialog__danger">{CONFIRM_DELETE_MESSAGE}</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--danger"
                        disabled=move || !list.with(HistoryController::can_confirm)
                        on:click=submit
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}
