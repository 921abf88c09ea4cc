//! Appeal types and identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an appeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppealId(u64);

impl AppealId {
    /// Creates a new appeal ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AppealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Creates a new user ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(u64);

impl DepartmentId {
    /// Creates a new department ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Appeal categories.
///
/// The declaration order doubles as the tie-break order for the
/// rule-based classifier: when two categories score equally, the
/// first-declared one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Roads, pavements, traffic, parking.
    Roads,
    /// Street lighting.
    Lighting,
    /// Parks, yards, benches, playgrounds.
    Improvement,
    /// Waste, pollution, air quality.
    Ecology,
    /// Public safety, accidents, crime.
    Safety,
    /// Hospitals, clinics, medical care.
    Healthcare,
    /// Water, heating, electricity, sewage.
    Utilities,
    /// Social support, pensions, benefits.
    Social,
    /// Anything that matches no other category.
    #[default]
    Other,
}

impl Category {
    /// Returns all category variants in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Roads,
            Self::Lighting,
            Self::Improvement,
            Self::Ecology,
            Self::Safety,
            Self::Healthcare,
            Self::Utilities,
            Self::Social,
            Self::Other,
        ]
    }

    /// Returns the category as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Roads => "roads",
            Self::Lighting => "lighting",
            Self::Improvement => "improvement",
            Self::Ecology => "ecology",
            Self::Safety => "safety",
            Self::Healthcare => "healthcare",
            Self::Utilities => "utilities",
            Self::Social => "social",
            Self::Other => "other",
        }
    }

    /// Parses a category from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "roads" => Some(Self::Roads),
            "lighting" => Some(Self::Lighting),
            "improvement" => Some(Self::Improvement),
            "ecology" => Some(Self::Ecology),
            "safety" => Some(Self::Safety),
            "healthcare" => Some(Self::Healthcare),
            "utilities" => Some(Self::Utilities),
            "social" => Some(Self::Social),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Appeal priority, totally ordered by urgency.
///
/// The derived `Ord` relies on declaration order: `Low < Medium < High < Urgent`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low urgency.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Needs attention soon.
    High,
    /// Needs immediate attention.
    Urgent,
}

impl Priority {
    /// Returns all priority variants from lowest to highest urgency.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Urgent]
    }

    /// Returns the priority as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Parses a priority from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sentiment of an appeal's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Positive tone.
    Positive,
    /// Negative tone.
    Negative,
    /// Neither clearly positive nor negative.
    #[default]
    Neutral,
}

impl Sentiment {
    /// Returns all sentiment variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Positive, Self::Negative, Self::Neutral]
    }

    /// Returns the sentiment as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Parses a sentiment from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of an appeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppealStatus {
    /// Submitted, not yet picked up.
    #[default]
    Pending,
    /// Assigned and being worked on.
    InProgress,
    /// Resolved by the responsible department.
    Resolved,
    /// Rejected as invalid or out of jurisdiction.
    Rejected,
    /// Closed without resolution.
    Closed,
}

impl AppealStatus {
    /// Returns all status variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Pending,
            Self::InProgress,
            Self::Resolved,
            Self::Rejected,
            Self::Closed,
        ]
    }

    /// Returns the status as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
            Self::Closed => "closed",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "in_progress" | "in-progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            "rejected" => Some(Self::Rejected),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for AppealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted citizen appeal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appeal {
    /// Unique identifier.
    pub id: AppealId,
    /// Short title of the problem.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Assigned category (inferred or user-supplied at creation).
    pub category: Category,
    /// Current lifecycle status.
    pub status: AppealStatus,
    /// Assigned priority.
    pub priority: Priority,
    /// Latitude of the reported location.
    pub latitude: Option<f64>,
    /// Longitude of the reported location.
    pub longitude: Option<f64>,
    /// Resolved or user-supplied street address.
    pub address: Option<String>,
    /// Resolved administrative district.
    pub district: Option<String>,
    /// Paths of uploaded images (storage itself is an external concern).
    pub images: Vec<String>,
    /// Submitting user.
    pub user_id: UserId,
    /// Department the appeal is routed to, if any.
    pub department_id: Option<DepartmentId>,
    /// Short summary produced by the triage pipeline.
    pub ai_summary: Option<String>,
    /// Sentiment produced by the triage pipeline.
    pub ai_sentiment: Option<Sentiment>,
    /// Classification confidence produced by the triage pipeline.
    pub ai_confidence: Option<f32>,
    /// Whether the triage pipeline flagged this as a likely duplicate.
    pub is_duplicate: bool,
    /// The earlier appeal this one duplicates, if resolved.
    pub duplicate_of: Option<AppealId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last administrative update, if any.
    pub updated_at: Option<DateTime<Utc>>,
    /// When the appeal was resolved, if it was.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Appeal {
    /// Returns title and description as one document, the form every
    /// triage operation consumes.
    #[must_use]
    pub fn full_text(&self) -> String {
        format!("{}\n{}", self.title, self.description)
    }
}

/// Payload for creating a new appeal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAppeal {
    /// Short title, 5 to 200 characters.
    pub title: String,
    /// Free-text description, at least 10 characters.
    pub description: String,
    /// Explicit category override. When set, it wins over the
    /// classifier's inferred category.
    pub category: Option<Category>,
    /// Latitude of the reported location.
    pub latitude: Option<f64>,
    /// Longitude of the reported location.
    pub longitude: Option<f64>,
    /// User-supplied street address.
    pub address: Option<String>,
    /// Paths of uploaded images.
    #[serde(default)]
    pub images: Vec<String>,
}

impl NewAppeal {
    /// Minimum title length in characters.
    pub const MIN_TITLE_LEN: usize = 5;
    /// Maximum title length in characters.
    pub const MAX_TITLE_LEN: usize = 200;
    /// Minimum description length in characters.
    pub const MIN_DESCRIPTION_LEN: usize = 10;

    /// Validates field lengths.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the title or description is out
    /// of bounds.
    pub fn validate(&self) -> crate::Result<()> {
        let title_len = self.title.chars().count();
        if title_len < Self::MIN_TITLE_LEN || title_len > Self::MAX_TITLE_LEN {
            return Err(crate::Error::InvalidInput(format!(
                "title must be {} to {} characters, got {title_len}",
                Self::MIN_TITLE_LEN,
                Self::MAX_TITLE_LEN
            )));
        }
        if self.description.chars().count() < Self::MIN_DESCRIPTION_LEN {
            return Err(crate::Error::InvalidInput(format!(
                "description must be at least {} characters",
                Self::MIN_DESCRIPTION_LEN
            )));
        }
        Ok(())
    }
}

/// Partial update applied by an administrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppealUpdate {
    /// New status.
    pub status: Option<AppealStatus>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New department assignment.
    pub department_id: Option<DepartmentId>,
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// One page of appeals plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct AppealPage {
    /// Appeals on this page, newest first.
    pub items: Vec<Appeal>,
    /// Total matching appeals across all pages.
    pub total: usize,
    /// 1-based page number.
    pub page: usize,
    /// Page size used for the query.
    pub size: usize,
    /// Total number of pages.
    pub pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Urgent);
    }

    #[test]
    fn test_category_parse_roundtrip() {
        for cat in Category::all() {
            assert_eq!(Category::parse(cat.as_str()), Some(*cat));
        }
        assert_eq!(Category::parse("plumbing"), None);
    }

    #[test]
    fn test_category_serde_rejects_out_of_set() {
        let ok: Result<Category, _> = serde_json::from_str("\"roads\"");
        assert_eq!(ok.unwrap(), Category::Roads);

        let bad: Result<Category, _> = serde_json::from_str("\"potholes\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_status_parse_accepts_both_separators() {
        assert_eq!(
            AppealStatus::parse("in_progress"),
            Some(AppealStatus::InProgress)
        );
        assert_eq!(
            AppealStatus::parse("in-progress"),
            Some(AppealStatus::InProgress)
        );
    }

    #[test]
    fn test_new_appeal_validation() {
        let appeal = NewAppeal {
            title: "Яма".to_string(),
            description: "Очень плохая яма на дороге".to_string(),
            ..Default::default()
        };
        assert!(appeal.validate().is_err());

        let appeal = NewAppeal {
            title: "Яма на дороге".to_string(),
            description: "короткий".to_string(),
            ..Default::default()
        };
        assert!(appeal.validate().is_err());

        let appeal = NewAppeal {
            title: "Яма на дороге".to_string(),
            description: "Очень плохая яма на дороге".to_string(),
            ..Default::default()
        };
        assert!(appeal.validate().is_ok());
    }

    #[test]
    fn test_full_text_concatenation() {
        let appeal = Appeal {
            id: AppealId::new(1),
            title: "title".to_string(),
            description: "description".to_string(),
            category: Category::Other,
            status: AppealStatus::Pending,
            priority: Priority::Medium,
            latitude: None,
            longitude: None,
            address: None,
            district: None,
            images: vec![],
            user_id: UserId::new(1),
            department_id: None,
            ai_summary: None,
            ai_sentiment: None,
            ai_confidence: None,
            is_duplicate: false,
            duplicate_of: None,
            created_at: Utc::now(),
            updated_at: None,
            resolved_at: None,
        };
        assert_eq!(appeal.full_text(), "title\ndescription");
    }
}
