//! Sentiment scoring strategies.

use super::keywords::{self, NEGATIVE_KEYWORDS, POSITIVE_KEYWORDS};
use crate::llm::LlmProvider;
use crate::models::{Sentiment, SentimentScore};

/// Scores free text as positive, negative, or neutral.
///
/// Like `Classifier`, implementations never fail: the LLM variant falls
/// back to keyword counting internally.
pub trait SentimentAnalyzer: Send + Sync {
    /// Scores `text` and returns a sentiment with confidence.
    fn analyze(&self, text: &str) -> SentimentScore;
}

/// Deterministic keyword-counting sentiment scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSentiment;

impl RuleSentiment {
    /// Confidence reported when keyword counts are equal (including both
    /// zero).
    pub const NEUTRAL_CONFIDENCE: f32 = 0.6;

    /// Upper bound on keyword-derived confidence.
    pub const MAX_CONFIDENCE: f32 = 0.9;

    /// Creates a new rule sentiment scorer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Maps a winning keyword count to a confidence value.
    fn confidence_for(count: usize) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let raw = 0.5 + 0.1 * count as f32;
        raw.min(Self::MAX_CONFIDENCE)
    }
}

impl SentimentAnalyzer for RuleSentiment {
    fn analyze(&self, text: &str) -> SentimentScore {
        let text_lower = text.to_lowercase();
        let negative = keywords::count_matches(&text_lower, NEGATIVE_KEYWORDS);
        let positive = keywords::count_matches(&text_lower, POSITIVE_KEYWORDS);

        if negative > positive {
            SentimentScore {
                sentiment: Sentiment::Negative,
                confidence: Self::confidence_for(negative),
            }
        } else if positive > negative {
            SentimentScore {
                sentiment: Sentiment::Positive,
                confidence: Self::confidence_for(positive),
            }
        } else {
            SentimentScore {
                sentiment: Sentiment::Neutral,
                confidence: Self::NEUTRAL_CONFIDENCE,
            }
        }
    }
}

/// LLM-primary sentiment scorer with rule-based fallback.
pub struct LlmSentiment<P: LlmProvider> {
    /// LLM provider for the primary path.
    llm: P,
    /// Deterministic fallback.
    fallback: RuleSentiment,
}

impl<P: LlmProvider> LlmSentiment<P> {
    /// Creates a new LLM sentiment scorer around `llm`.
    #[must_use]
    pub const fn new(llm: P) -> Self {
        Self {
            llm,
            fallback: RuleSentiment::new(),
        }
    }
}

impl<P: LlmProvider> SentimentAnalyzer for LlmSentiment<P> {
    fn analyze(&self, text: &str) -> SentimentScore {
        match self.llm.analyze_sentiment(text) {
            Ok(score) => score,
            Err(e) => {
                tracing::warn!(
                    provider = self.llm.name(),
                    "LLM sentiment analysis failed, using rule fallback: {e}"
                );
                self.fallback.analyze(text)
            },
        }
    }
}
