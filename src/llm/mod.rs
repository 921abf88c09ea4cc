//! LLM client abstraction.
//!
//! Provides a unified interface for the external language-model
//! capability used by the triage pipeline. Each triage call is a single
//! request expecting a strict-JSON reply; no streaming, no multi-turn
//! state, no retries.

mod openai;

pub use openai::OpenAiClient;

use crate::models::{Category, Classification, Priority, Sentiment, SentimentScore};
use crate::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// System prompt for appeal classification.
pub const CLASSIFY_SYSTEM_PROMPT: &str =
    "Ты помощник для классификации обращений граждан. Отвечай только валидным JSON.";

/// System prompt for sentiment analysis.
pub const SENTIMENT_SYSTEM_PROMPT: &str =
    "Ты помощник для анализа тональности. Отвечай только валидным JSON.";

/// Trait for LLM providers.
pub trait LlmProvider: Send + Sync {
    /// The provider name.
    fn name(&self) -> &'static str;

    /// Generates a completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion fails.
    fn complete(&self, prompt: &str) -> Result<String>;

    /// Generates a completion with a system prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion fails.
    ///
    /// Default implementation concatenates system and user prompts.
    /// Providers should override this to use native system prompt support.
    fn complete_with_system(&self, system: &str, user: &str) -> Result<String> {
        let combined = format!("{system}\n\n---\n\nUser message:\n{user}");
        self.complete(&combined)
    }

    /// Classifies an appeal text into category, priority, summary, and
    /// confidence.
    ///
    /// Any error here (transport, malformed JSON, an enum value outside
    /// the closed set) is a fallback trigger for the calling strategy,
    /// never a user-visible failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the call or reply parsing fails.
    fn classify_appeal(&self, text: &str) -> Result<Classification> {
        let user = format!(
            r#"Проанализируй следующее обращение гражданина и определи:
1. Категорию из списка: roads, lighting, improvement, ecology, safety, healthcare, utilities, social, other
2. Приоритет: low, medium, high, urgent
3. Краткое резюме проблемы (1-2 предложения)

Обращение: {text}

Ответь в формате JSON:
{{
    "category": "category_name",
    "priority": "priority_level",
    "summary": "краткое резюме",
    "confidence": 0.0-1.0
}}"#
        );
        let response = self.complete_with_system(CLASSIFY_SYSTEM_PROMPT, &user)?;
        parse_classification(&response)
    }

    /// Estimates the sentiment of an appeal text.
    ///
    /// Same single-failure-triggers-fallback policy as `classify_appeal`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call or reply parsing fails.
    fn analyze_sentiment(&self, text: &str) -> Result<SentimentScore> {
        let user = format!(
            r#"Определи тональность следующего обращения: positive, negative, или neutral.

Обращение: {text}

Ответь в формате JSON:
{{
    "sentiment": "positive|negative|neutral",
    "confidence": 0.0-1.0
}}"#
        );
        let response = self.complete_with_system(SENTIMENT_SYSTEM_PROMPT, &user)?;
        parse_sentiment(&response)
    }
}

/// HTTP client configuration for LLM providers.
#[derive(Debug, Clone, Copy)]
pub struct LlmHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for LlmHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl LlmHttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.apply_env_overrides(
            std::env::var("GLAS_LLM_TIMEOUT_MS").ok(),
            std::env::var("GLAS_LLM_CONNECT_TIMEOUT_MS").ok(),
        )
    }

    /// Applies the override values read from the environment. Values
    /// that fail to parse as milliseconds are ignored.
    fn apply_env_overrides(
        mut self,
        timeout_ms: Option<String>,
        connect_timeout_ms: Option<String>,
    ) -> Self {
        if let Some(v) = timeout_ms.and_then(|v| v.parse::<u64>().ok()) {
            self.timeout_ms = v;
        }
        if let Some(v) = connect_timeout_ms.and_then(|v| v.parse::<u64>().ok()) {
            self.connect_timeout_ms = v;
        }
        self
    }
}

/// Builds a blocking HTTP client for LLM requests with configured timeouts.
#[must_use]
pub fn build_http_client(config: LlmHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build LLM HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}

/// Raw classification reply shape.
///
/// `category` and `priority` deserialize straight into the closed enums,
/// so an out-of-set string fails here and becomes a fallback trigger.
#[derive(Debug, Deserialize)]
struct ClassificationReply {
    category: Category,
    priority: Priority,
    #[serde(default)]
    summary: String,
    confidence: f32,
}

/// Raw sentiment reply shape.
#[derive(Debug, Deserialize)]
struct SentimentReply {
    sentiment: Sentiment,
    confidence: f32,
}

/// Parses a classification response from LLM output.
///
/// Handles markdown code blocks and surrounding prose around the JSON.
fn parse_classification(response: &str) -> Result<Classification> {
    let json_str = extract_json_from_response(response);
    let reply: ClassificationReply =
        serde_json::from_str(json_str).map_err(|e| Error::OperationFailed {
            operation: "parse_classification".to_string(),
            cause: format!("Invalid JSON: {e}. Response: {response}"),
        })?;

    Ok(Classification {
        category: reply.category,
        priority: reply.priority,
        summary: reply.summary,
        confidence: reply.confidence.clamp(0.0, 1.0),
    })
}

/// Parses a sentiment response from LLM output.
fn parse_sentiment(response: &str) -> Result<SentimentScore> {
    let json_str = extract_json_from_response(response);
    let reply: SentimentReply =
        serde_json::from_str(json_str).map_err(|e| Error::OperationFailed {
            operation: "parse_sentiment".to_string(),
            cause: format!("Invalid JSON: {e}. Response: {response}"),
        })?;

    Ok(SentimentScore {
        sentiment: reply.sentiment,
        confidence: reply.confidence.clamp(0.0, 1.0),
    })
}

/// Extracts JSON from LLM response, handling markdown code blocks.
fn extract_json_from_response(response: &str) -> &str {
    let trimmed = response.trim();

    // Handle ```json ... ``` blocks
    if let Some(start) = trimmed.find("```json") {
        let json_start = start + 7;
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // Handle ``` ... ``` blocks (without json marker)
    if let Some(start) = trimmed.find("```") {
        let content_start = start + 3;
        // Skip language identifier if present (e.g., "json\n")
        let after_marker = &trimmed[content_start..];
        let json_start = after_marker
            .find('{')
            .map_or(content_start, |pos| content_start + pos);
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // Handle raw JSON (find first { to last })
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_env_overrides() {
        let config = LlmHttpConfig::default()
            .apply_env_overrides(Some("5000".to_string()), Some("1000".to_string()));
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.connect_timeout_ms, 1000);
    }

    #[test]
    fn test_http_config_ignores_unparseable_values() {
        let config = LlmHttpConfig::default().apply_env_overrides(Some("fast".to_string()), None);
        assert_eq!(config.timeout_ms, LlmHttpConfig::default().timeout_ms);
        assert_eq!(
            config.connect_timeout_ms,
            LlmHttpConfig::default().connect_timeout_ms
        );
    }

    #[test]
    fn test_extract_json_raw() {
        let response = r#"{"key": "value"}"#;
        let json = extract_json_from_response(response);
        assert_eq!(json, r#"{"key": "value"}"#);
    }

    #[test]
    fn test_extract_json_markdown() {
        let response = "```json\n{\"category\": \"roads\"}\n```";
        let json = extract_json_from_response(response);
        assert!(json.contains("\"category\""));
    }

    #[test]
    fn test_extract_json_with_prefix() {
        let response = "Here is the result: {\"key\": \"value\"} hope this helps";
        let json = extract_json_from_response(response);
        assert_eq!(json, r#"{"key": "value"}"#);
    }

    #[test]
    fn test_parse_classification_success() {
        let response = r#"{
            "category": "roads",
            "priority": "urgent",
            "summary": "Яма на проезжей части",
            "confidence": 0.92
        }"#;

        let result = parse_classification(response).unwrap();
        assert_eq!(result.category, Category::Roads);
        assert_eq!(result.priority, Priority::Urgent);
        assert!((result.confidence - 0.92).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_classification_rejects_out_of_set_category() {
        let response = r#"{
            "category": "potholes",
            "priority": "urgent",
            "summary": "",
            "confidence": 0.9
        }"#;

        assert!(parse_classification(response).is_err());
    }

    #[test]
    fn test_parse_classification_rejects_out_of_set_priority() {
        let response = r#"{
            "category": "roads",
            "priority": "critical",
            "summary": "",
            "confidence": 0.9
        }"#;

        assert!(parse_classification(response).is_err());
    }

    #[test]
    fn test_parse_classification_clamps_confidence() {
        let response = r#"{"category": "roads", "priority": "low", "summary": "s", "confidence": 1.7}"#;
        let result = parse_classification(response).unwrap();
        assert!((result.confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_sentiment_success() {
        let response = r#"{"sentiment": "negative", "confidence": 0.8}"#;
        let result = parse_sentiment(response).unwrap();
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert!((result.confidence - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_sentiment_rejects_out_of_set_value() {
        let response = r#"{"sentiment": "angry", "confidence": 0.8}"#;
        assert!(parse_sentiment(response).is_err());
    }

    #[test]
    fn test_parse_sentiment_malformed_json() {
        assert!(parse_sentiment("not json at all").is_err());
    }
}
