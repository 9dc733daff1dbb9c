//! Durable store for products added while offline
//!
//! Records live in a single JSON file, upserted by product identity and
//! written atomically through a temp file. Order on read is not guaranteed;
//! the engine restores enqueue order from the persisted timestamps.

use crate::models::{OfflineRecord, ProductId};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::debug;

/// Key-based persistence for records awaiting upload.
///
/// `save` is an idempotent upsert; `delete` of a missing identity is a no-op.
#[async_trait]
pub trait OfflineStore: Send + Sync {
    async fn save(&self, record: &OfflineRecord) -> Result<()>;
    async fn fetch_all(&self) -> Result<Vec<OfflineRecord>>;
    async fn delete(&self, id: &ProductId) -> Result<()>;
}

/// JSON-file-backed offline store
pub struct JsonOfflineStore {
    path: PathBuf,
}

impl JsonOfflineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_records(&self) -> Result<Vec<OfflineRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut file = File::open(&self.path)
            .with_context(|| format!("Failed to open offline store {:?}", self.path))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .context("Failed to read offline store")?;

        serde_json::from_slice(&data).context("Failed to deserialize offline store")
    }

    fn write_records(&self, records: &[OfflineRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let json = serde_json::to_vec(records).context("Failed to serialize offline records")?;

        // Write atomically using temp file
        let temp_path = self.path.with_extension("tmp");
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file {:?}", temp_path))?;

        file.write_all(&json)
            .context("Failed to write offline records")?;
        file.sync_all().context("Failed to sync offline store")?;

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to rename {:?} to {:?}", temp_path, self.path))?;

        Ok(())
    }
}

#[async_trait]
impl OfflineStore for JsonOfflineStore {
    async fn save(&self, record: &OfflineRecord) -> Result<()> {
        let mut records = self.read_records()?;

        let id = record.product_id();
        match records.iter_mut().find(|r| r.product_id() == id) {
            // Saving twice with the same identity overwrites, never duplicates.
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }

        self.write_records(&records)?;
        debug!(product = %id, entries = records.len(), "Saved offline record");
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<OfflineRecord>> {
        self.read_records()
    }

    async fn delete(&self, id: &ProductId) -> Result<()> {
        let mut records = self.read_records()?;
        let before = records.len();
        records.retain(|r| &r.product_id() != id);

        // Deleting a missing identity is a no-op, not an error.
        if records.len() != before {
            self.write_records(&records)?;
            debug!(product = %id, "Deleted offline record");
        }
        Ok(())
    }
}
