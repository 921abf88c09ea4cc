//! The triage pipeline.
//!
//! Composes the classifier, sentiment scorer, and duplicate detector
//! into the single enrichment step run at appeal creation time.

mod classifier;
mod duplicate;
pub mod keywords;
mod sentiment;

pub use classifier::{Classifier, LlmClassifier, RuleClassifier};
pub use duplicate::{SHARED_WORD_THRESHOLD, find_duplicate};
pub use sentiment::{LlmSentiment, RuleSentiment, SentimentAnalyzer};

use crate::config::GlasConfig;
use crate::llm::OpenAiClient;
use crate::models::{Appeal, Category, Enrichment};
use tracing::instrument;

/// Orchestrates classification, sentiment scoring, and duplicate
/// detection for one appeal.
///
/// The classifier and scorer strategies are selected once at
/// construction based on whether an LLM credential is configured; the
/// rest of the pipeline is stateless and deterministic. Strategies
/// apply their fallback internally, so `enrich` never fails and never
/// returns a partial result.
pub struct TriageEngine {
    classifier: Box<dyn Classifier>,
    analyzer: Box<dyn SentimentAnalyzer>,
}

impl TriageEngine {
    /// Creates an engine from explicit strategies.
    #[must_use]
    pub fn with_strategies(
        classifier: Box<dyn Classifier>,
        analyzer: Box<dyn SentimentAnalyzer>,
    ) -> Self {
        Self {
            classifier,
            analyzer,
        }
    }

    /// Creates a rule-only engine (no external calls at all).
    #[must_use]
    pub fn rule_based() -> Self {
        Self::with_strategies(
            Box::new(RuleClassifier::new()),
            Box::new(RuleSentiment::new()),
        )
    }

    /// Creates an engine per configuration.
    ///
    /// An API key in the LLM config selects the LLM-primary strategies;
    /// its absence is a configuration state, not an error, and selects
    /// the rule-based strategies outright.
    #[must_use]
    pub fn from_config(config: &GlasConfig) -> Self {
        let Some(api_key) = config.llm.api_key.clone() else {
            tracing::debug!("no LLM credential configured, triage runs rule-based");
            return Self::rule_based();
        };

        let build_client = || {
            let mut client = OpenAiClient::new().with_api_key(api_key.clone());
            if let Some(endpoint) = &config.llm.endpoint {
                client = client.with_endpoint(endpoint.clone());
            }
            if let Some(model) = &config.llm.model {
                client = client.with_model(model.clone());
            }
            client.with_temperature(config.llm.temperature)
        };

        Self::with_strategies(
            Box::new(LlmClassifier::new(build_client())),
            Box::new(LlmSentiment::new(build_client())),
        )
    }

    /// Runs the full pipeline for one appeal.
    ///
    /// Classification and sentiment scoring are independent and both
    /// always complete (with fallback applied internally). Duplicate
    /// detection runs over `recent`, the submitting user's appeals from
    /// the trailing window in the order the store returned them, and a
    /// matched index is resolved to that appeal's id.
    ///
    /// The explicit `category_override` wins over the inferred category;
    /// priority, summary, confidence, and sentiment always come from the
    /// pipeline.
    #[instrument(skip_all, fields(title_len = title.len(), candidates = recent.len()))]
    #[must_use]
    pub fn enrich(
        &self,
        title: &str,
        description: &str,
        category_override: Option<Category>,
        recent: &[Appeal],
    ) -> Enrichment {
        let text = format!("{title}\n{description}");

        let classification = self.classifier.classify(title, description);
        let sentiment = self.analyzer.analyze(&text);

        let candidate_texts: Vec<String> = recent.iter().map(Appeal::full_text).collect();
        let duplicate_of = find_duplicate(&text, &candidate_texts)
            .and_then(|idx| recent.get(idx))
            .map(|matched| matched.id);

        tracing::debug!(
            category = %classification.category,
            priority = %classification.priority,
            sentiment = %sentiment.sentiment,
            is_duplicate = duplicate_of.is_some(),
            "triage complete"
        );

        Enrichment {
            category: category_override.unwrap_or(classification.category),
            priority: classification.priority,
            summary: classification.summary,
            confidence: classification.confidence,
            sentiment: sentiment.sentiment,
            sentiment_confidence: sentiment.confidence,
            is_duplicate: duplicate_of.is_some(),
            duplicate_of,
        }
    }
}
