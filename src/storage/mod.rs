//! Storage seam for appeals.
//!
//! A real persistence engine is an external collaborator; this module
//! defines the trait the services talk to, plus the in-memory reference
//! backend used by the CLI and tests.

mod memory;

pub use memory::InMemoryStore;

use crate::Result;
use crate::models::{Appeal, AppealId, AppealStatus, Category, UserId};
use chrono::{DateTime, Utc};

/// Filter for appeal listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppealFilter {
    /// Only appeals with this status.
    pub status: Option<AppealStatus>,
    /// Only appeals by this user.
    pub user_id: Option<UserId>,
    /// Only appeals in this category.
    pub category: Option<Category>,
}

impl AppealFilter {
    /// Returns true if `appeal` passes every set field.
    #[must_use]
    pub fn matches(&self, appeal: &Appeal) -> bool {
        self.status.is_none_or(|s| appeal.status == s)
            && self.user_id.is_none_or(|u| appeal.user_id == u)
            && self.category.is_none_or(|c| appeal.category == c)
    }
}

/// Persistence backend for appeals.
///
/// Implementations must return `recent_for_user` results in a
/// deterministic order within a single call; creation order is what the
/// in-memory backend provides.
pub trait AppealStore: Send + Sync {
    /// Persists a new appeal, assigning its id.
    ///
    /// The `id` field of the input is ignored; the returned appeal
    /// carries the assigned one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn insert(&self, appeal: Appeal) -> Result<Appeal>;

    /// Fetches an appeal by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; a missing id is `Ok(None)`.
    fn get(&self, id: AppealId) -> Result<Option<Appeal>>;

    /// Overwrites an existing appeal.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the id was never inserted.
    fn put(&self, appeal: &Appeal) -> Result<()>;

    /// Lists appeals matching `filter`, newest first.
    ///
    /// Returns the matching slice for the 1-based `page` of `size`
    /// items, along with the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list(
        &self,
        filter: &AppealFilter,
        page: usize,
        size: usize,
    ) -> Result<(Vec<Appeal>, usize)>;

    /// Returns up to `limit` appeals by `user_id` created at or after
    /// `cutoff`, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn recent_for_user(
        &self,
        user_id: UserId,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Appeal>>;

    /// Returns all appeals created at or after `cutoff`, for analytics.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn created_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Appeal>>;

    /// Returns every stored appeal.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn all(&self) -> Result<Vec<Appeal>>;
}
