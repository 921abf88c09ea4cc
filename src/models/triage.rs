//! Triage pipeline result types.

use super::{AppealId, Category, Priority, Sentiment};
use serde::{Deserialize, Serialize};

/// Category/priority inference for one appeal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Inferred category.
    pub category: Category,
    /// Inferred priority.
    pub priority: Priority,
    /// Short summary of the problem.
    pub summary: String,
    /// Confidence in the inference, 0.0 to 1.0.
    pub confidence: f32,
}

/// Sentiment estimate for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Estimated sentiment.
    pub sentiment: Sentiment,
    /// Confidence in the estimate, 0.0 to 1.0.
    pub confidence: f32,
}

/// Merged output of one triage run.
///
/// Produced once at appeal creation and written into the persisted
/// appeal; immutable afterwards except through explicit administrative
/// edits of category/priority/status.
#[derive(Debug, Clone, Serialize)]
pub struct Enrichment {
    /// Final category: the user override when given, otherwise inferred.
    pub category: Category,
    /// Inferred priority (never user-overridable at creation time).
    pub priority: Priority,
    /// Short summary of the problem.
    pub summary: String,
    /// Classification confidence, 0.0 to 1.0.
    pub confidence: f32,
    /// Estimated sentiment.
    pub sentiment: Sentiment,
    /// Sentiment confidence, 0.0 to 1.0.
    pub sentiment_confidence: f32,
    /// Whether a recent appeal by the same user looks like the same report.
    pub is_duplicate: bool,
    /// The matched earlier appeal, when one was found.
    pub duplicate_of: Option<AppealId>,
}
