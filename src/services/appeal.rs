//! Appeal CRUD and the creation-time triage composition.

use super::Geocoder;
use crate::config::TriageConfig;
use crate::models::{
    Appeal, AppealId, AppealPage, AppealStatus, AppealUpdate, NewAppeal, UserId,
};
use crate::storage::{AppealFilter, AppealStore};
use crate::triage::TriageEngine;
use crate::{Error, Result};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::instrument;

/// Service for working with appeals.
///
/// Owns the triage engine and talks to the storage and geocoding seams.
/// Appeal creation always succeeds with some valid enrichment even if
/// every external dependency is unreachable.
pub struct AppealService {
    store: Arc<dyn AppealStore>,
    triage: TriageEngine,
    geocoder: Option<Arc<dyn Geocoder>>,
    triage_config: TriageConfig,
}

impl AppealService {
    /// Creates a service over `store` with the given triage engine.
    #[must_use]
    pub fn new(store: Arc<dyn AppealStore>, triage: TriageEngine) -> Self {
        Self {
            store,
            triage,
            geocoder: None,
            triage_config: TriageConfig::default(),
        }
    }

    /// Attaches a reverse-geocoding capability.
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Overrides the triage tuning (recent window and limit).
    #[must_use]
    pub const fn with_triage_config(mut self, config: TriageConfig) -> Self {
        self.triage_config = config;
        self
    }

    /// Creates a new appeal: validates the payload, resolves location
    /// data, runs the triage pipeline over the user's recent appeals,
    /// and persists the enriched result.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if validation fails, or a storage
    /// error if the write is rejected. Triage and geocoding failures are
    /// absorbed, never propagated.
    #[instrument(skip(self, new_appeal), fields(user = %user_id))]
    pub fn create(&self, user_id: UserId, new_appeal: NewAppeal) -> Result<Appeal> {
        new_appeal.validate()?;

        let district = self.lookup_district(new_appeal.latitude, new_appeal.longitude);
        let address = new_appeal
            .address
            .clone()
            .or_else(|| self.lookup_address(new_appeal.latitude, new_appeal.longitude));

        let now = Utc::now();
        let cutoff = now - Duration::days(self.triage_config.recent_window_days);
        let recent = self
            .store
            .recent_for_user(user_id, cutoff, self.triage_config.recent_limit)?;

        let enrichment = self.triage.enrich(
            &new_appeal.title,
            &new_appeal.description,
            new_appeal.category,
            &recent,
        );

        let appeal = Appeal {
            id: AppealId::new(0), // assigned by the store
            title: new_appeal.title,
            description: new_appeal.description,
            category: enrichment.category,
            status: AppealStatus::Pending,
            priority: enrichment.priority,
            latitude: new_appeal.latitude,
            longitude: new_appeal.longitude,
            address,
            district,
            images: new_appeal.images,
            user_id,
            department_id: None,
            ai_summary: Some(enrichment.summary),
            ai_sentiment: Some(enrichment.sentiment),
            ai_confidence: Some(enrichment.confidence),
            is_duplicate: enrichment.is_duplicate,
            duplicate_of: enrichment.duplicate_of,
            created_at: now,
            updated_at: None,
            resolved_at: None,
        };

        self.store.insert(appeal)
    }

    /// Fetches an appeal by id.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the id is unknown.
    pub fn get(&self, id: AppealId) -> Result<Appeal> {
        self.store.get(id)?.ok_or(Error::NotFound(id))
    }

    /// Lists appeals matching `filter` with a pagination envelope,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub fn list(&self, filter: &AppealFilter, page: usize, size: usize) -> Result<AppealPage> {
        let page = page.max(1);
        let size = size.max(1);
        let (items, total) = self.store.list(filter, page, size)?;
        Ok(AppealPage {
            items,
            total,
            page,
            size,
            pages: total.div_ceil(size),
        })
    }

    /// Applies an administrative update.
    ///
    /// Moving the status to `Resolved` stamps `resolved_at`; every
    /// update stamps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the id is unknown.
    #[instrument(skip(self, update), fields(appeal = %id))]
    pub fn update(&self, id: AppealId, update: AppealUpdate) -> Result<Appeal> {
        let mut appeal = self.get(id)?;
        let now = Utc::now();

        if let Some(status) = update.status {
            appeal.status = status;
            if status == AppealStatus::Resolved {
                appeal.resolved_at = Some(now);
            }
        }
        if let Some(priority) = update.priority {
            appeal.priority = priority;
        }
        if let Some(department_id) = update.department_id {
            appeal.department_id = Some(department_id);
        }
        if let Some(title) = update.title {
            appeal.title = title;
        }
        if let Some(description) = update.description {
            appeal.description = description;
        }
        appeal.updated_at = Some(now);

        self.store.put(&appeal)?;
        Ok(appeal)
    }

    fn lookup_district(&self, latitude: Option<f64>, longitude: Option<f64>) -> Option<String> {
        let (geocoder, lat, lon) = (self.geocoder.as_ref()?, latitude?, longitude?);
        match geocoder.district(lat, lon) {
            Ok(district) => district,
            Err(e) => {
                tracing::warn!("district lookup failed: {e}");
                None
            },
        }
    }

    fn lookup_address(&self, latitude: Option<f64>, longitude: Option<f64>) -> Option<String> {
        let (geocoder, lat, lon) = (self.geocoder.as_ref()?, latitude?, longitude?);
        match geocoder.reverse_address(lat, lon) {
            Ok(address) => address,
            Err(e) => {
                tracing::warn!("address lookup failed: {e}");
                None
            },
        }
    }
}
