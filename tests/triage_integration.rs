//! End-to-end tests for the triage pipeline and the appeal service.
//!
//! Everything here runs against the in-memory store with the rule-based
//! strategies or a scripted fake LLM provider; no network access.

// Integration tests use expect/unwrap for simplicity
#![allow(clippy::expect_used, clippy::unwrap_used)]

use glas::config::GlasConfig;
use glas::llm::LlmProvider;
use glas::models::{Category, NewAppeal, Priority, Sentiment, UserId};
use glas::storage::{AppealFilter, InMemoryStore};
use glas::triage::{Classifier, LlmClassifier, LlmSentiment, SentimentAnalyzer, TriageEngine};
use glas::{AnalyticsService, AppealService, AppealStatus, AppealUpdate};
use std::sync::Arc;

/// Fake provider replying with a fixed string, or failing outright.
struct ScriptedLlm {
    reply: Option<&'static str>,
}

impl ScriptedLlm {
    const fn replying(reply: &'static str) -> Self {
        Self { reply: Some(reply) }
    }

    const fn failing() -> Self {
        Self { reply: None }
    }
}

impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn complete(&self, _prompt: &str) -> glas::Result<String> {
        self.reply.map_or_else(
            || {
                Err(glas::Error::OperationFailed {
                    operation: "scripted_llm".to_string(),
                    cause: "unreachable endpoint".to_string(),
                })
            },
            |r| Ok(r.to_string()),
        )
    }
}

fn rule_service() -> AppealService {
    AppealService::new(Arc::new(InMemoryStore::new()), TriageEngine::rule_based())
}

#[test]
fn end_to_end_pothole_scenario() {
    let service = rule_service();
    let appeal = service
        .create(
            UserId::new(1),
            NewAppeal {
                title: "Яма на дороге".to_string(),
                description: "Очень плохо: яма, опасно для машин, нужно срочно чинить"
                    .to_string(),
                ..Default::default()
            },
        )
        .expect("creation must always succeed");

    assert_eq!(appeal.category, Category::Roads);
    assert_eq!(appeal.priority, Priority::Urgent);
    assert_eq!(appeal.ai_sentiment, Some(Sentiment::Negative));
    assert_eq!(appeal.status, AppealStatus::Pending);
    assert!(appeal.ai_confidence.is_some());
    assert!(!appeal.is_duplicate);
}

#[test]
fn llm_reply_is_used_when_valid() {
    let classifier = LlmClassifier::new(ScriptedLlm::replying(
        r#"{"category": "lighting", "priority": "high", "summary": "Фонарь не горит", "confidence": 0.92}"#,
    ));

    let result = classifier.classify("Тёмный двор", "Фонарь не горит уже неделю");
    assert_eq!(result.category, Category::Lighting);
    assert_eq!(result.priority, Priority::High);
    assert!((result.confidence - 0.92).abs() < f32::EPSILON);
}

#[test]
fn llm_failure_falls_back_to_rules() {
    let classifier = LlmClassifier::new(ScriptedLlm::failing());

    let result = classifier.classify("Яма на дороге", "опасно, нужно срочно чинить");
    // Rule path: roads category, urgent priority, fixed confidence.
    assert_eq!(result.category, Category::Roads);
    assert_eq!(result.priority, Priority::Urgent);
    assert!((result.confidence - 0.6).abs() < f32::EPSILON);
}

#[test]
fn llm_malformed_json_falls_back_to_rules() {
    let classifier = LlmClassifier::new(ScriptedLlm::replying("I could not classify this one"));

    let result = classifier.classify("Яма на дороге", "опасно для машин");
    assert_eq!(result.category, Category::Roads);
    assert!((result.confidence - 0.6).abs() < f32::EPSILON);
}

#[test]
fn llm_out_of_set_enum_falls_back_to_rules() {
    // Valid JSON, but the category is outside the closed set: the
    // enum conversion fails and that counts as a call failure.
    let classifier = LlmClassifier::new(ScriptedLlm::replying(
        r#"{"category": "potholes", "priority": "high", "summary": "s", "confidence": 0.9}"#,
    ));

    let result = classifier.classify("Яма на дороге", "опасно для машин");
    assert_eq!(result.category, Category::Roads);
    assert!((result.confidence - 0.6).abs() < f32::EPSILON);
}

#[test]
fn llm_sentiment_falls_back_on_failure() {
    let analyzer = LlmSentiment::new(ScriptedLlm::failing());
    let score = analyzer.analyze("всё очень плохо, это проблема");
    assert_eq!(score.sentiment, Sentiment::Negative);

    let analyzer = LlmSentiment::new(ScriptedLlm::replying(
        r#"{"sentiment": "positive", "confidence": 0.85}"#,
    ));
    let score = analyzer.analyze("любой текст");
    assert_eq!(score.sentiment, Sentiment::Positive);
    assert!((score.confidence - 0.85).abs() < f32::EPSILON);
}

#[test]
fn unconfigured_capability_selects_rule_strategies() {
    // No api key anywhere in this config: enrichment must be fully
    // populated without any external call.
    let config = GlasConfig::default();
    let engine = TriageEngine::from_config(&config);

    let enrichment = engine.enrich("Мусор во дворе", "Свалка мусор не вывозят неделю", None, &[]);
    assert_eq!(enrichment.category, Category::Ecology);
    assert!((enrichment.confidence - 0.6).abs() < f32::EPSILON);
}

#[test]
fn duplicate_boundary_six_shared_words() {
    let service = rule_service();
    let user = UserId::new(7);

    let first = service
        .create(
            user,
            NewAppeal {
                title: "крыло альфа бета гамма".to_string(),
                description: "дельта эпсилон дзета посторонние слова".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

    // Shares exactly 6 distinct words with the first appeal.
    let second = service
        .create(
            user,
            NewAppeal {
                title: "крыло альфа бета гамма".to_string(),
                description: "дельта эпсилон совсем иные формулировки".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(second.is_duplicate);
    assert_eq!(second.duplicate_of, Some(first.id));
}

#[test]
fn duplicate_boundary_five_shared_words() {
    let service = rule_service();
    let user = UserId::new(8);

    service
        .create(
            user,
            NewAppeal {
                title: "крыло альфа бета гамма".to_string(),
                description: "дельта посторонние слова здесь".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

    // Shares exactly 5 distinct words: below the strict >5 threshold.
    let second = service
        .create(
            user,
            NewAppeal {
                title: "крыло альфа бета гамма".to_string(),
                description: "дельта совсем иные формулировки".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(!second.is_duplicate);
    assert!(second.duplicate_of.is_none());
}

#[test]
fn category_override_wins_but_priority_stays_inferred() {
    let service = rule_service();
    let appeal = service
        .create(
            UserId::new(2),
            NewAppeal {
                title: "Яма на дороге".to_string(),
                description: "нужно срочно чинить проезжую часть".to_string(),
                category: Some(Category::Improvement),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(appeal.category, Category::Improvement);
    assert_eq!(appeal.priority, Priority::Urgent);
}

#[test]
fn admin_flow_and_analytics() {
    let store = Arc::new(InMemoryStore::new());
    let service = AppealService::new(
        Arc::clone(&store) as Arc<dyn glas::AppealStore>,
        TriageEngine::rule_based(),
    );

    let user = UserId::new(3);
    let first = service
        .create(
            user,
            NewAppeal {
                title: "Не горит фонарь".to_string(),
                description: "Во дворе темно по вечерам".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    service
        .create(
            user,
            NewAppeal {
                title: "Прорвало трубу".to_string(),
                description: "Вода течёт по всей улице".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

    service
        .update(
            first.id,
            AppealUpdate {
                status: Some(AppealStatus::Resolved),
                ..Default::default()
            },
        )
        .unwrap();

    let page = service.list(&AppealFilter::default(), 1, 10).unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.pages, 1);

    let resolved_only = service
        .list(
            &AppealFilter {
                status: Some(AppealStatus::Resolved),
                ..Default::default()
            },
            1,
            10,
        )
        .unwrap();
    assert_eq!(resolved_only.total, 1);
    assert_eq!(resolved_only.items[0].id, first.id);

    let stats = AnalyticsService::new(store)
        .dashboard_stats(30)
        .unwrap();
    assert_eq!(stats.total_appeals, 2);
    assert_eq!(stats.appeals_by_status.get("resolved"), Some(&1));
    assert_eq!(stats.appeals_by_status.get("pending"), Some(&1));
    assert!((stats.resolution_rate - 50.0).abs() < f64::EPSILON);
}
