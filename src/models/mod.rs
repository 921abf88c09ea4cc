//! Data models for glas.
//!
//! This module contains all the core data structures used throughout the system.

mod appeal;
mod triage;

pub use appeal::{
    Appeal, AppealId, AppealPage, AppealStatus, AppealUpdate, Category, DepartmentId, NewAppeal,
    Priority, Sentiment, UserId,
};
pub use triage::{Classification, Enrichment, SentimentScore};
