//! Wire model of the remote analysis service.
//!
//! Field names follow the service's camelCase JSON. Scoring fields are
//! optional because the service stores them as nullable columns; the client
//! never derives them, it only displays what it received.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// ENUMS
// =============================================================================

/// Whether an item describes a downside or an upside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnalysisType {
    #[default]
    Risk,
    Opportunity,
}

impl AnalysisType {
    /// Wire spelling (`RISK` / `OPPORTUNITY`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Risk => "RISK",
            Self::Opportunity => "OPPORTUNITY",
        }
    }

    /// Human label used by the type selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Risk => "Risk",
            Self::Opportunity => "Opportunity",
        }
    }
}

/// Priority assigned by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Badge severity used for styling (`low`, `medium`, `high`).
    /// `HIGH` and `CRITICAL` share the same severity.
    #[must_use]
    pub fn severity(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High | Self::Critical => "high",
        }
    }
}

// =============================================================================
// ANALYSIS ITEM
// =============================================================================

/// A scored analysis persisted by the service. Identity is `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AnalysisType,
    #[serde(default)]
    pub category: Option<String>,
    /// 0 to 10.
    #[serde(default)]
    pub impact_score: Option<f64>,
    /// 0.0 to 1.0.
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub ai_analysis: Option<String>,
    #[serde(default)]
    pub mitigation_strategy: Option<String>,
    #[serde(default)]
    pub exploitation_plan: Option<String>,
}

impl AnalysisItem {
    /// `8/10` style impact label, empty when the service sent none.
    #[must_use]
    pub fn impact_label(&self) -> String {
        self.impact_score
            .map(|score| format!("{}/10", format_number(score)))
            .unwrap_or_default()
    }

    /// Impact score without the scale suffix.
    #[must_use]
    pub fn impact_value(&self) -> String {
        self.impact_score.map(format_number).unwrap_or_default()
    }

    /// Probability as a percentage with one decimal (`60.0%`).
    #[must_use]
    pub fn probability_label(&self) -> String {
        self.probability
            .map(|p| format!("{:.1}%", p * 100.0))
            .unwrap_or_default()
    }

    /// Risk score with two decimals (`4.80`).
    #[must_use]
    pub fn risk_score_label(&self) -> String {
        self.risk_score.map(|s| format!("{s:.2}")).unwrap_or_default()
    }

    #[must_use]
    pub fn priority_label(&self) -> &'static str {
        self.priority.map_or("", Priority::as_str)
    }

    /// Calendar date portion of `createdAt` (`2025-03-14`).
    #[must_use]
    pub fn created_date(&self) -> &str {
        let Some(raw) = self.created_at.as_deref() else {
            return "";
        };
        raw.split_once('T').map_or(raw, |(date, _)| date)
    }

    /// Text disclosed by the row-level "view details" action.
    ///
    /// Always includes the AI analysis; mitigation and exploitation sections
    /// are appended only when the service provided them.
    #[must_use]
    pub fn details_text(&self) -> String {
        let mut out = format!("Details: {}", self.ai_analysis.as_deref().unwrap_or(""));
        if let Some(plan) = self.mitigation_strategy.as_deref().filter(|s| !s.trim().is_empty()) {
            out.push_str("\n\nMitigation: ");
            out.push_str(plan);
        }
        if let Some(plan) = self.exploitation_plan.as_deref().filter(|s| !s.trim().is_empty()) {
            out.push_str("\n\nExploitation: ");
            out.push_str(plan);
        }
        out
    }
}

/// Render whole numbers without a trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = value as i64;
        whole.to_string()
    } else {
        value.to_string()
    }
}

// =============================================================================
// RAG STATUS
// =============================================================================

/// Snapshot of the document corpus behind RAG queries. Replaced wholesale on
/// every poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagStatus {
    pub document_count: u64,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_mock_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for RagStatus {
    fn default() -> Self {
        Self {
            document_count: 0,
            status: "inactive".to_owned(),
            use_mock_mode: None,
            timestamp: None,
            error: None,
        }
    }
}

impl RagStatus {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

// =============================================================================
// SUBMISSION DRAFT
// =============================================================================

/// Local form state for a structured analysis. Sent as-is to the service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AnalysisType,
}

impl SubmissionDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, kind: AnalysisType) -> Self {
        Self { title: title.into(), description: description.into(), kind }
    }

    /// Both `title` and `description` must be non-blank.
    ///
    /// # Errors
    ///
    /// Returns the first blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}
