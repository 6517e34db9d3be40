//! Offline-first record repository.
//!
//! This is the single source of truth the presentation layer talks to:
//! 1. Reads go to the backend first and refresh the local cache; when the
//!    backend cannot be reached the cached collection is returned instead.
//! 2. Writes land in the local cache first and are then pushed to the
//!    backend. A failed push is logged and otherwise ignored; the local
//!    mutation stands.
//!
//! Only local persistence failures are returned as errors.
//!
//! Callers are expected to await each operation before starting the next
//! one; nothing here locks the cache against concurrent read-modify-write.

use thiserror::Error;

use crate::cache::{CacheError, FileCacheStore};
use crate::gateway::RecordGateway;
use crate::models::{sort_by_date_desc, FuelRecord};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Local storage error: {0}")]
    Cache(#[from] CacheError),
}

/// Repository that keeps the local cache and the backend in step.
pub struct SyncRecordRepository<G> {
    cache: FileCacheStore,
    gateway: G,
}

impl<G: RecordGateway> SyncRecordRepository<G> {
    pub fn new(cache: FileCacheStore, gateway: G) -> Self {
        Self { cache, gateway }
    }

    pub fn cache(&self) -> &FileCacheStore {
        &self.cache
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // ========== Read operations ==========

    /// Returns the full collection, newest first.
    ///
    /// A successful fetch replaces the cache wholesale; nothing is merged.
    /// If that cache write fails the failure is only logged and the fetched
    /// records are still returned. When the backend is unreachable the cache
    /// is read instead, and a failure there is returned as
    /// `RepositoryError::Cache`.
    pub async fn list_all(&self) -> Result<Vec<FuelRecord>, RepositoryError> {
        match self.gateway.list_all().await {
            Ok(mut records) => {
                sort_by_date_desc(&mut records);
                if let Err(e) = self.cache.save(&records).await {
                    tracing::warn!("Failed to refresh record cache: {}", e);
                }
                tracing::debug!("Fetched {} record(s) from server", records.len());
                Ok(records)
            }
            Err(e) => {
                tracing::warn!("Server unavailable, using local records: {}", e);
                let mut records = self.cache.load().await?;
                sort_by_date_desc(&mut records);
                Ok(records)
            }
        }
    }

    /// Answers the presentation layer entering a screen.
    ///
    /// This is the standard read path; there is no polling behind it.
    pub async fn on_enter(&self) -> Result<Vec<FuelRecord>, RepositoryError> {
        self.list_all().await
    }

    /// Finds a record by id in the current collection.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<FuelRecord>, RepositoryError> {
        let records = self.list_all().await?;
        Ok(records.into_iter().find(|r| r.id == id))
    }

    /// Odometer reading of the newest record, or `None` for an empty
    /// collection.
    ///
    /// Goes through `list_all` so the next distance computation sees the
    /// synced collection, not a stale cache.
    pub async fn last_odometer_reading(&self) -> Result<Option<f64>, RepositoryError> {
        let records = self.list_all().await?;
        Ok(records.first().map(|r| r.odometer_reading))
    }

    // ========== Write operations ==========

    /// Adds a record locally, then pushes it to the server.
    pub async fn create(&self, record: &FuelRecord) -> Result<(), RepositoryError> {
        let mut records = self.cache.load().await?;
        records.push(record.clone());
        sort_by_date_desc(&mut records);
        self.cache.save(&records).await?;

        if let Err(e) = self.gateway.create(record).await {
            tracing::warn!("Record {} saved locally only: {}", record.id, e);
        }

        Ok(())
    }

    /// Replaces a record locally, then pushes the change to the server.
    ///
    /// When the id is not in the local cache the cache is left alone and the
    /// server is still asked to apply the update.
    pub async fn update(&self, record: &FuelRecord) -> Result<(), RepositoryError> {
        let mut records = self.cache.load().await?;
        if let Some(slot) = records.iter_mut().find(|r| r.id == record.id) {
            *slot = record.clone();
            sort_by_date_desc(&mut records);
            self.cache.save(&records).await?;
        } else {
            tracing::debug!("Record {} not in local cache", record.id);
        }

        if let Err(e) = self.gateway.update(&record.id, record).await {
            tracing::warn!("Record {} updated locally only: {}", record.id, e);
        }

        Ok(())
    }

    /// Removes a record locally, then asks the server to delete it.
    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let mut records = self.cache.load().await?;
        records.retain(|r| r.id != id);
        self.cache.save(&records).await?;

        if let Err(e) = self.gateway.remove(id).await {
            tracing::warn!("Record {} deleted locally only: {}", id, e);
        }

        Ok(())
    }
}
