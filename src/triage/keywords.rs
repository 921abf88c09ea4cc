//! Keyword rule tables for the deterministic triage paths.
//!
//! Static, immutable data: the tables are shared by reference into the
//! rule-based classifier and sentiment scorer. Keywords are matched as
//! case-insensitive substrings against lower-cased appeal text, so each
//! entry must already be lower-case.

use crate::models::Category;

/// Trigger keywords per category, in category declaration order.
///
/// `Category::Other` has no keywords: it is the result of every
/// category scoring zero, not a match of its own.
pub static CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Roads,
        &[
            "дорога",
            "яма",
            "асфальт",
            "тротуар",
            "транспорт",
            "пробка",
            "парковка",
        ],
    ),
    (
        Category::Lighting,
        &["освещение", "фонарь", "свет", "темно", "лампа"],
    ),
    (
        Category::Improvement,
        &[
            "благоустройство",
            "скамейка",
            "парк",
            "сквер",
            "двор",
            "детская площадка",
        ],
    ),
    (
        Category::Ecology,
        &["мусор", "отходы", "экология", "свалка", "загрязнение", "воздух"],
    ),
    (
        Category::Safety,
        &["безопасность", "опасно", "травма", "авария", "преступление"],
    ),
    (
        Category::Healthcare,
        &["больница", "поликлиника", "врач", "здоровье", "медицина"],
    ),
    (
        Category::Utilities,
        &[
            "коммунальные",
            "вода",
            "отопление",
            "электричество",
            "канализация",
        ],
    ),
    (
        Category::Social,
        &[
            "социальная помощь",
            "пенсия",
            "льготы",
            "инвалид",
            "малоимущий",
        ],
    ),
];

/// Keywords that force `Priority::Urgent`.
pub static URGENT_KEYWORDS: &[&str] = &["срочно", "опасно", "авария", "травма", "пожар"];

/// Keywords that force `Priority::High` when no urgent keyword matched.
pub static HIGH_KEYWORDS: &[&str] = &["важно", "критично", "не работает", "сломан"];

/// Negative-tone keywords for the rule-based sentiment scorer.
pub static NEGATIVE_KEYWORDS: &[&str] = &[
    "плохо",
    "ужасно",
    "не работает",
    "сломан",
    "проблема",
    "жалоба",
];

/// Positive-tone keywords for the rule-based sentiment scorer.
pub static POSITIVE_KEYWORDS: &[&str] = &["спасибо", "хорошо", "отлично", "благодарю"];

/// Counts how many keywords from `keywords` occur in `text_lower`.
///
/// Each keyword contributes at most 1 regardless of how many times it
/// repeats in the text. `text_lower` must already be lower-cased.
#[must_use]
pub fn count_matches(text_lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| text_lower.contains(*kw)).count()
}

/// Returns true if any keyword from `keywords` occurs in `text_lower`.
#[must_use]
pub fn any_match(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text_lower.contains(*kw))
}
