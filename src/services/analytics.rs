//! Dashboard analytics over the appeal store.

use crate::Result;
use crate::models::AppealStatus;
use crate::storage::AppealStore;
use chrono::{Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

/// One point of the per-day appeal timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    /// Calendar date (UTC), `YYYY-MM-DD`.
    pub date: String,
    /// Appeals created on that date.
    pub count: usize,
}

/// One entry of the top-districts ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictCount {
    /// District name as resolved at creation time.
    pub district: String,
    /// Appeals reported in that district within the window.
    pub count: usize,
}

/// Aggregated dashboard statistics.
///
/// Per-status/category/priority/sentiment counts, the timeline, and the
/// district ranking are computed over the trailing window; the total,
/// resolution rate, and average resolution time cover all appeals.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    /// Total appeals ever created.
    pub total_appeals: usize,
    /// Windowed counts keyed by status string.
    pub appeals_by_status: HashMap<String, usize>,
    /// Windowed counts keyed by category string.
    pub appeals_by_category: HashMap<String, usize>,
    /// Windowed counts keyed by priority string.
    pub appeals_by_priority: HashMap<String, usize>,
    /// Average hours from creation to resolution, over all resolved
    /// appeals, rounded to two decimals.
    pub average_resolution_time: f64,
    /// Percentage of all appeals that are resolved, rounded to two
    /// decimals.
    pub resolution_rate: f64,
    /// Appeals created per day within the window, ascending by date.
    pub appeals_timeline: Vec<TimelinePoint>,
    /// Up to ten districts with the most appeals within the window.
    pub top_districts: Vec<DistrictCount>,
    /// Windowed counts keyed by sentiment string.
    pub sentiment_distribution: HashMap<String, usize>,
}

/// Maximum number of districts reported in the ranking.
const TOP_DISTRICTS_LIMIT: usize = 10;

/// Service computing dashboard statistics.
pub struct AnalyticsService {
    store: Arc<dyn AppealStore>,
}

impl AnalyticsService {
    /// Creates a service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn AppealStore>) -> Self {
        Self { store }
    }

    /// Computes dashboard statistics with a trailing window of `days`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    #[instrument(skip(self))]
    #[allow(clippy::cast_precision_loss)]
    pub fn dashboard_stats(&self, days: i64) -> Result<DashboardStats> {
        let cutoff = Utc::now() - Duration::days(days);
        let all = self.store.all()?;
        let windowed = self.store.created_since(cutoff)?;

        let total_appeals = all.len();

        let mut appeals_by_status = HashMap::new();
        let mut appeals_by_category = HashMap::new();
        let mut appeals_by_priority = HashMap::new();
        let mut sentiment_distribution = HashMap::new();
        let mut timeline: HashMap<String, usize> = HashMap::new();
        let mut districts: HashMap<String, usize> = HashMap::new();

        for appeal in &windowed {
            *appeals_by_status
                .entry(appeal.status.as_str().to_string())
                .or_insert(0) += 1;
            *appeals_by_category
                .entry(appeal.category.as_str().to_string())
                .or_insert(0) += 1;
            *appeals_by_priority
                .entry(appeal.priority.as_str().to_string())
                .or_insert(0) += 1;
            if let Some(sentiment) = appeal.ai_sentiment {
                *sentiment_distribution
                    .entry(sentiment.as_str().to_string())
                    .or_insert(0) += 1;
            }
            if let Some(district) = &appeal.district {
                *districts.entry(district.clone()).or_insert(0) += 1;
            }
            let date = appeal.created_at.date_naive().to_string();
            *timeline.entry(date).or_insert(0) += 1;
        }

        let mut appeals_timeline: Vec<TimelinePoint> = timeline
            .into_iter()
            .map(|(date, count)| TimelinePoint { date, count })
            .collect();
        appeals_timeline.sort_by(|a, b| a.date.cmp(&b.date));

        let mut top_districts: Vec<DistrictCount> = districts
            .into_iter()
            .map(|(district, count)| DistrictCount { district, count })
            .collect();
        top_districts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.district.cmp(&b.district)));
        top_districts.truncate(TOP_DISTRICTS_LIMIT);

        let resolution_hours: Vec<f64> = all
            .iter()
            .filter(|a| a.status == AppealStatus::Resolved)
            .filter_map(|a| a.resolved_at.map(|r| (r - a.created_at).num_seconds()))
            .map(|secs| secs as f64 / 3600.0)
            .collect();
        let average_resolution_time = if resolution_hours.is_empty() {
            0.0
        } else {
            let sum: f64 = resolution_hours.iter().sum();
            round2(sum / resolution_hours.len() as f64)
        };

        let resolved_count = all
            .iter()
            .filter(|a| a.status == AppealStatus::Resolved)
            .count();
        let resolution_rate = if total_appeals > 0 {
            round2(resolved_count as f64 / total_appeals as f64 * 100.0)
        } else {
            0.0
        };

        Ok(DashboardStats {
            total_appeals,
            appeals_by_status,
            appeals_by_category,
            appeals_by_priority,
            average_resolution_time,
            resolution_rate,
            appeals_timeline,
            top_districts,
            sentiment_distribution,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Appeal, AppealId, AppealStatus, Category, Priority, Sentiment, UserId,
    };
    use crate::storage::InMemoryStore;
    use chrono::{DateTime, Duration, Utc};

    fn appeal(created_at: DateTime<Utc>) -> Appeal {
        Appeal {
            id: AppealId::new(0),
            title: "обращение".to_string(),
            description: "описание обращения".to_string(),
            category: Category::Roads,
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
            ai_sentiment: Some(Sentiment::Negative),
            ai_confidence: Some(0.6),
            is_duplicate: false,
            duplicate_of: None,
            created_at,
            updated_at: None,
            resolved_at: None,
        }
    }

    #[test]
    fn test_empty_store() {
        let store = Arc::new(InMemoryStore::new());
        let stats = AnalyticsService::new(store).dashboard_stats(30).unwrap();

        assert_eq!(stats.total_appeals, 0);
        assert!(stats.appeals_by_status.is_empty());
        assert!((stats.resolution_rate - 0.0).abs() < f64::EPSILON);
        assert!((stats.average_resolution_time - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_windowed_counts_exclude_old_appeals() {
        let store = Arc::new(InMemoryStore::new());
        let now = Utc::now();
        store.insert(appeal(now)).unwrap();
        store.insert(appeal(now - Duration::days(40))).unwrap();

        let stats = AnalyticsService::new(Arc::clone(&store) as Arc<dyn AppealStore>)
            .dashboard_stats(30)
            .unwrap();

        // Total covers everything; per-status counts only the window.
        assert_eq!(stats.total_appeals, 2);
        assert_eq!(stats.appeals_by_status.get("pending"), Some(&1));
        assert_eq!(stats.appeals_by_category.get("roads"), Some(&1));
        assert_eq!(stats.sentiment_distribution.get("negative"), Some(&1));
    }

    #[test]
    fn test_resolution_rate_and_time() {
        let store = Arc::new(InMemoryStore::new());
        let now = Utc::now();

        let mut resolved = appeal(now - Duration::hours(10));
        resolved.status = AppealStatus::Resolved;
        resolved.resolved_at = Some(now - Duration::hours(4));
        store.insert(resolved).unwrap();
        store.insert(appeal(now)).unwrap();

        let stats = AnalyticsService::new(Arc::clone(&store) as Arc<dyn AppealStore>)
            .dashboard_stats(30)
            .unwrap();

        assert!((stats.resolution_rate - 50.0).abs() < f64::EPSILON);
        assert!((stats.average_resolution_time - 6.0).abs() < 0.01);
    }

    #[test]
    fn test_top_districts_ranked_and_limited() {
        let store = Arc::new(InMemoryStore::new());
        let now = Utc::now();
        for i in 0..12 {
            for _ in 0..=i {
                let mut a = appeal(now);
                a.district = Some(format!("Район {i}"));
                store.insert(a).unwrap();
            }
        }

        let stats = AnalyticsService::new(Arc::clone(&store) as Arc<dyn AppealStore>)
            .dashboard_stats(30)
            .unwrap();

        assert_eq!(stats.top_districts.len(), 10);
        assert_eq!(stats.top_districts[0].district, "Район 11");
        assert_eq!(stats.top_districts[0].count, 12);
    }

    #[test]
    fn test_timeline_is_sorted_ascending() {
        let store = Arc::new(InMemoryStore::new());
        let now = Utc::now();
        store.insert(appeal(now)).unwrap();
        store.insert(appeal(now - Duration::days(2))).unwrap();
        store.insert(appeal(now - Duration::days(2))).unwrap();

        let stats = AnalyticsService::new(Arc::clone(&store) as Arc<dyn AppealStore>)
            .dashboard_stats(30)
            .unwrap();

        assert_eq!(stats.appeals_timeline.len(), 2);
        assert!(stats.appeals_timeline[0].date < stats.appeals_timeline[1].date);
        assert_eq!(stats.appeals_timeline[0].count, 2);
    }
}
