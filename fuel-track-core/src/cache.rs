//! On-device cache of the full record collection.
//!
//! The whole collection lives as one JSON array under a single storage key
//! (`fuel_records.json` inside the data directory) and is overwritten on
//! every save.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::models::FuelRecord;

/// Storage key of the record collection.
pub const STORAGE_KEY: &str = "fuel_records";

/// Errors that threaten local durability. These are surfaced to callers.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CacheError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}

/// File-backed record cache.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    data_dir: PathBuf,
}

impl FileCacheStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the cached collection.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", STORAGE_KEY))
    }

    /// Loads the cached collection.
    ///
    /// A missing file or a payload that does not parse counts as "no data"
    /// and yields an empty collection. Other I/O failures are errors.
    pub async fn load(&self) -> Result<Vec<FuelRecord>, CacheError> {
        let path = self.path();

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CacheError::io(path, e)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable record cache {}: {}",
                    path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the cached collection.
    ///
    /// Writes a temp file and renames it over the target, so a reader sees
    /// either the old collection or the new one.
    pub async fn save(&self, records: &[FuelRecord]) -> Result<(), CacheError> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| CacheError::io(&self.data_dir, e))?;

        let bytes = serde_json::to_vec(records)?;
        let path = self.path();
        let temp_path = path.with_extension("json.tmp");

        let mut file = File::create(&temp_path)
            .await
            .map_err(|e| CacheError::io(&temp_path, e))?;
        file.write_all(&bytes)
            .await
            .map_err(|e| CacheError::io(&temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| CacheError::io(&temp_path, e))?;

        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| CacheError::io(path, e))?;

        Ok(())
    }
}
