//! In-memory appeal store.

use super::{AppealFilter, AppealStore};
use crate::models::{Appeal, AppealId, UserId};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Reference `AppealStore` backend keeping everything in process memory.
///
/// Ids are assigned from a monotonically increasing counter, so
/// iteration over the underlying map is creation order. Suitable for
/// tests and the CLI; durability is a non-goal here.
#[derive(Debug)]
pub struct InMemoryStore {
    appeals: RwLock<BTreeMap<AppealId, Appeal>>,
    next_id: AtomicU64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            appeals: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<AppealId, Appeal>>> {
        self.appeals.read().map_err(|_| Error::OperationFailed {
            operation: "store_read".to_string(),
            cause: "lock poisoned".to_string(),
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<AppealId, Appeal>>> {
        self.appeals.write().map_err(|_| Error::OperationFailed {
            operation: "store_write".to_string(),
            cause: "lock poisoned".to_string(),
        })
    }
}

impl AppealStore for InMemoryStore {
    fn insert(&self, mut appeal: Appeal) -> Result<Appeal> {
        let id = AppealId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        appeal.id = id;
        self.write()?.insert(id, appeal.clone());
        Ok(appeal)
    }

    fn get(&self, id: AppealId) -> Result<Option<Appeal>> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn put(&self, appeal: &Appeal) -> Result<()> {
        let mut appeals = self.write()?;
        if !appeals.contains_key(&appeal.id) {
            return Err(Error::NotFound(appeal.id));
        }
        appeals.insert(appeal.id, appeal.clone());
        Ok(())
    }

    fn list(
        &self,
        filter: &AppealFilter,
        page: usize,
        size: usize,
    ) -> Result<(Vec<Appeal>, usize)> {
        let appeals = self.read()?;
        let mut matching: Vec<Appeal> = appeals
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len();
        let start = page.saturating_sub(1).saturating_mul(size);
        let items = matching.into_iter().skip(start).take(size).collect();
        Ok((items, total))
    }

    fn recent_for_user(
        &self,
        user_id: UserId,
        cutoff: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Appeal>> {
        let appeals = self.read()?;
        Ok(appeals
            .values()
            .filter(|a| a.user_id == user_id && a.created_at >= cutoff)
            .take(limit)
            .cloned()
            .collect())
    }

    fn created_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Appeal>> {
        let appeals = self.read()?;
        Ok(appeals
            .values()
            .filter(|a| a.created_at >= cutoff)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<Appeal>> {
        Ok(self.read()?.values().cloned().collect())
    }
}
