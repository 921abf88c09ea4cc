//! # Glas
//!
//! Citizen appeal intake and triage core.
//!
//! Glas receives citizen-submitted appeals (free text plus optional
//! geolocation and images), classifies each one into a category and
//! priority, estimates sentiment, flags likely duplicates, and exposes
//! the CRUD and dashboard-analytics operations administrators work with.
//!
//! ## Features
//!
//! - Category/priority classification with an LLM-primary path and a
//!   deterministic keyword fallback
//! - Sentiment scoring with the same single-failure fallback policy
//! - Cheap lexical duplicate detection over a user's recent appeals
//! - Pluggable storage and geocoding seams (trait-based collaborators)
//!
//! ## Example
//!
//! ```rust,ignore
//! use glas::{AppealService, NewAppeal, TriageEngine};
//!
//! let service = AppealService::new(store, TriageEngine::from_config(&config));
//! let appeal = service.create(user_id, NewAppeal {
//!     title: "Яма на дороге".to_string(),
//!     description: "Очень плохая яма, опасно для машин".to_string(),
//!     ..Default::default()
//! })?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod llm;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
pub mod triage;

// Re-exports for convenience
pub use config::GlasConfig;
pub use llm::LlmProvider;
pub use models::{
    Appeal, AppealId, AppealPage, AppealStatus, AppealUpdate, Category, Classification,
    Enrichment, NewAppeal, Priority, Sentiment, SentimentScore, UserId,
};
pub use services::{AnalyticsService, AppealService, DashboardStats, Geocoder};
pub use storage::{AppealFilter, AppealStore, InMemoryStore};
pub use triage::TriageEngine;

/// Error type for glas operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Appeal validation fails, malformed JSON, unknown enum strings |
/// | `OperationFailed` | LLM transport errors, storage failures, config file problems |
/// | `NotFound` | An appeal id does not resolve to a stored appeal |
///
/// Note that LLM failures never reach the caller of the triage pipeline:
/// they trigger the rule-based fallback inside the strategy that made the
/// call. `OperationFailed` from the LLM layer is only visible to that
/// strategy.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - Appeal title/description fail length validation
    /// - JSON deserialization fails for an LLM reply
    /// - An enum string is outside its closed set
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - An LLM API call fails (transport, non-2xx, empty reply)
    /// - A storage backend rejects an operation
    /// - The config file cannot be read or parsed
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A referenced entity does not exist.
    #[error("appeal not found: {0}")]
    NotFound(models::AppealId),
}

/// Result type alias for glas operations.
pub type Result<T> = std::result::Result<T, Error>;
