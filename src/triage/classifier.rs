//! Category/priority classification strategies.

use super::keywords::{self, CATEGORY_KEYWORDS, HIGH_KEYWORDS, URGENT_KEYWORDS};
use crate::llm::LlmProvider;
use crate::models::{Category, Classification, Priority};

/// Classifies an appeal into a category and priority.
///
/// Implementations are infallible from the caller's point of view: the
/// LLM-backed variant falls back to the rule-based one internally, so
/// `classify` always yields a valid `Classification`.
pub trait Classifier: Send + Sync {
    /// Classifies `title` + `description` into category, priority,
    /// summary, and confidence.
    fn classify(&self, title: &str, description: &str) -> Classification;
}

/// Deterministic keyword classifier.
///
/// Used directly when no LLM capability is configured, and as the
/// fallback inside `LlmClassifier` when a call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier;

impl RuleClassifier {
    /// Text length (in characters) below which a keyword-less appeal is
    /// considered low priority.
    pub const SHORT_TEXT_LEN: usize = 50;

    /// Maximum summary length (in characters) before truncation.
    pub const MAX_SUMMARY_LEN: usize = 200;

    /// Fixed confidence reported by the rule path.
    pub const RULE_CONFIDENCE: f32 = 0.6;

    /// Creates a new rule classifier.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Picks the category with the most matching keywords.
    ///
    /// Ties go to the first-declared category; an all-zero score means
    /// `Category::Other`.
    fn infer_category(text_lower: &str) -> Category {
        let mut best = Category::Other;
        let mut best_score = 0;
        for (category, kws) in CATEGORY_KEYWORDS {
            let score = keywords::count_matches(text_lower, kws);
            if score > best_score {
                best = *category;
                best_score = score;
            }
        }
        best
    }

    /// Applies the fixed priority precedence: urgent keywords, then high
    /// keywords, then the short-text rule, then medium.
    ///
    /// A short text containing an urgent keyword is still urgent; the
    /// keyword checks come before the length check.
    fn infer_priority(text_lower: &str, text_len: usize) -> Priority {
        if keywords::any_match(text_lower, URGENT_KEYWORDS) {
            Priority::Urgent
        } else if keywords::any_match(text_lower, HIGH_KEYWORDS) {
            Priority::High
        } else if text_len < Self::SHORT_TEXT_LEN {
            Priority::Low
        } else {
            Priority::Medium
        }
    }

    /// Returns the text verbatim if it fits, otherwise the first 200
    /// characters with a trailing ellipsis marker (203 characters total).
    fn summarize(text: &str) -> String {
        if text.chars().count() > Self::MAX_SUMMARY_LEN {
            let truncated: String = text.chars().take(Self::MAX_SUMMARY_LEN).collect();
            format!("{truncated}...")
        } else {
            text.to_string()
        }
    }
}

impl Classifier for RuleClassifier {
    fn classify(&self, title: &str, description: &str) -> Classification {
        let text = format!("{title}\n{description}");
        let text_lower = text.to_lowercase();

        Classification {
            category: Self::infer_category(&text_lower),
            priority: Self::infer_priority(&text_lower, text.chars().count()),
            summary: Self::summarize(&text),
            confidence: Self::RULE_CONFIDENCE,
        }
    }
}

/// LLM-primary classifier with rule-based fallback.
///
/// One structured-prompt call per classification; any error (transport,
/// malformed JSON, out-of-set enum value) falls back to the embedded
/// rule classifier for that call. No retries, never fatal.
pub struct LlmClassifier<P: LlmProvider> {
    /// LLM provider for the primary path.
    llm: P,
    /// Deterministic fallback.
    fallback: RuleClassifier,
}

impl<P: LlmProvider> LlmClassifier<P> {
    /// Creates a new LLM classifier around `llm`.
    #[must_use]
    pub const fn new(llm: P) -> Self {
        Self {
            llm,
            fallback: RuleClassifier::new(),
        }
    }
}

impl<P: LlmProvider> Classifier for LlmClassifier<P> {
    fn classify(&self, title: &str, description: &str) -> Classification {
        let text = format!("{title}\n{description}");
        match self.llm.classify_appeal(&text) {
            Ok(classification) => classification,
            Err(e) => {
                tracing::warn!(
                    provider = self.llm.name(),
                    "LLM classification failed, using rule fallback: {e}"
                );
                self.fallback.classify(title, description)
            },
        }
    }
}
