//! Server-side record sheet.
//!
//! Stands in for the spreadsheet the backend persists to: one row per
//! record, kept in insertion order, stored as JSON:
//! ```text
//! <DATA_DIR>/
//!   sheet.json
//! ```
//!
//! The sheet is read from disk on first use and kept in memory afterwards.
//! `invalidate` drops the in-memory copy so the next access reloads it.

use std::io;
use std::path::{Path, PathBuf};

use fuel_track_core::FuelRecord;
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub const SHEET_FILE: &str = "sheet.json";

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse sheet {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode sheet: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Record not found")]
    NotFound(String),
}

/// Row store for fuel records.
#[derive(Debug)]
pub struct SheetStore {
    data_dir: PathBuf,
    rows: Mutex<Option<Vec<FuelRecord>>>,
}

impl SheetStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            rows: Mutex::new(None),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join(SHEET_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Drops the cached rows; the next call reads the sheet from disk again.
    pub async fn invalidate(&self) {
        *self.rows.lock().await = None;
    }

    /// All rows in insertion order.
    pub async fn all(&self) -> Result<Vec<FuelRecord>, SheetError> {
        let mut guard = self.rows.lock().await;
        Ok(self.rows_mut(&mut guard).await?.clone())
    }

    /// Appends a row.
    pub async fn add(&self, record: FuelRecord) -> Result<FuelRecord, SheetError> {
        let mut guard = self.rows.lock().await;
        let rows = self.rows_mut(&mut guard).await?;

        let mut next = rows.clone();
        next.push(record.clone());
        self.commit(rows, next).await?;

        Ok(record)
    }

    /// Overwrites every column of the row with the given id.
    pub async fn update(&self, id: &str, record: FuelRecord) -> Result<FuelRecord, SheetError> {
        let mut guard = self.rows.lock().await;
        let rows = self.rows_mut(&mut guard).await?;

        let index = rows
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| SheetError::NotFound(id.to_string()))?;
        let updated = FuelRecord {
            id: id.to_string(),
            ..record
        };

        let mut next = rows.clone();
        next[index] = updated.clone();
        self.commit(rows, next).await?;

        Ok(updated)
    }

    /// Deletes the row with the given id.
    pub async fn delete(&self, id: &str) -> Result<(), SheetError> {
        let mut guard = self.rows.lock().await;
        let rows = self.rows_mut(&mut guard).await?;

        let index = rows
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| SheetError::NotFound(id.to_string()))?;

        let mut next = rows.clone();
        next.remove(index);
        self.commit(rows, next).await
    }

    /// Persists `next` and only then makes it the in-memory copy.
    async fn commit(
        &self,
        rows: &mut Vec<FuelRecord>,
        next: Vec<FuelRecord>,
    ) -> Result<(), SheetError> {
        self.persist(&next).await?;
        *rows = next;
        Ok(())
    }

    /// Returns the cached rows, loading them from disk on first use.
    async fn rows_mut<'a>(
        &self,
        slot: &'a mut Option<Vec<FuelRecord>>,
    ) -> Result<&'a mut Vec<FuelRecord>, SheetError> {
        if slot.is_none() {
            let rows = self.load().await?;
            tracing::info!("Loaded {} row(s) from {}", rows.len(), self.path().display());
            *slot = Some(rows);
        }
        Ok(slot.get_or_insert_with(Vec::new))
    }

    async fn load(&self) -> Result<Vec<FuelRecord>, SheetError> {
        let path = self.path();
        match fs::read(&path).await {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| SheetError::Parse { path, source })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(SheetError::Io { path, source }),
        }
    }

    /// Writes atomically using temp file + rename.
    async fn persist(&self, rows: &[FuelRecord]) -> Result<(), SheetError> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| SheetError::Io {
                path: self.data_dir.clone(),
                source,
            })?;

        let bytes = serde_json::to_vec_pretty(rows)?;
        let path = self.path();
        let temp_path = path.with_extension("json.tmp");

        let mut file = File::create(&temp_path)
            .await
            .map_err(|source| SheetError::Io {
                path: temp_path.clone(),
                source,
            })?;
        file.write_all(&bytes)
            .await
            .map_err(|source| SheetError::Io {
                path: temp_path.clone(),
                source,
            })?;
        file.sync_all().await.map_err(|source| SheetError::Io {
            path: temp_path.clone(),
            source,
        })?;

        fs::rename(&temp_path, &path)
            .await
            .map_err(|source| SheetError::Io { path, source })
    }
}
