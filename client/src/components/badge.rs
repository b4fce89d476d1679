//! Badge class names for analysis types and priorities.

#[cfg(test)]
#[path = "badge_test.rs"]
mod badge_test;

use analysis::{AnalysisType, Priority};
use leptos::prelude::*;

#[must_use]
pub fn type_badge_class(kind: AnalysisType) -> &'static str {
    match kind {
        AnalysisType::Risk => "badge badge--risk",
        AnalysisType::Opportunity => "badge badge--opportunity",
    }
}

/// `CRITICAL` shares the `high` color with `HIGH`.
#[must_use]
pub fn priority_badge_class(priority: Option<Priority>) -> String {
    match priority {
        Some(p) => format!("badge badge--priority-{}", p.severity()),
        None => "badge".to_owned(),
    }
}

#[component]
pub fn TypeBadge(kind: AnalysisType) -> impl IntoView {
    view! { <span class=type_badge_class(kind)>{kind.as_str()}</span> }
}

#[component]
pub fn PriorityBadge(priority: Option<Priority>) -> impl IntoView {
    view! {
        <span class=priority_badge_class(priority)>{priority.map(Priority::as_str).unwrap_or_default()}</span>
    }
}
