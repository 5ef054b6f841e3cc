//! Append-only prediction log.
//!
//! The store is injected into the HTTP state rather than reached through a
//! global file handle. No locking is done across processes: concurrent
//! writers may interleave rows.

use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{PredictorError, Result};
use crate::model::PredictionRecord;

#[async_trait]
pub trait PredictionStore: Send + Sync {
    async fn append(&self, record: &PredictionRecord) -> Result<()>;

    /// All records in append order.
    async fn read_all(&self) -> Result<Vec<PredictionRecord>>;
}

/// CSV file backed store. Columns: `fecha,pcr,fc,edad,categoria`.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PredictionStore for CsvStore {
    async fn append(&self, record: &PredictionRecord) -> Result<()> {
        let path = self.path.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || append_row(&path, &record)).await?
    }

    async fn read_all(&self) -> Result<Vec<PredictionRecord>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_rows(&path)).await?
    }
}

fn append_row(path: &Path, record: &PredictionRecord) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let write_header = file.metadata()?.len() == 0;
    if write_header {
        tracing::debug!("Creating prediction log at {}", path.display());
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

fn read_rows(path: &Path) -> Result<Vec<PredictionRecord>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Prediction log {} not found, treating as empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: PredictionRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// In-process store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<PredictionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<PredictionRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn poisoned() -> PredictorError {
        PredictorError::Internal {
            message: "memory store lock poisoned".to_string(),
        }
    }
}

#[async_trait]
impl PredictionStore for MemoryStore {
    async fn append(&self, record: &PredictionRecord) -> Result<()> {
        let mut records = self.records.lock().map_err(|_| Self::poisoned())?;
        records.push(record.clone());
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<PredictionRecord>> {
        let records = self.records.lock().map_err(|_| Self::poisoned())?;
        Ok(records.clone())
    }
}
