//! Persisted favorite-identity set
//!
//! One string-array entry in a JSON file, the local source of truth the
//! engine reconciles fetched products against.

use crate::models::ProductId;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Key-value persistence for favorite identities
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn load(&self) -> Result<Vec<ProductId>>;
    async fn save(&self, ids: &[ProductId]) -> Result<()>;
}

/// JSON-file-backed favorite store
pub struct JsonFavoriteStore {
    path: PathBuf,
}

impl JsonFavoriteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FavoriteStore for JsonFavoriteStore {
    async fn load(&self) -> Result<Vec<ProductId>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read favorite store {:?}", self.path))?;
        serde_json::from_slice(&data).context("Failed to deserialize favorite identities")
    }

    async fn save(&self, ids: &[ProductId]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let json = serde_json::to_vec(ids).context("Failed to serialize favorite identities")?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file {:?}", temp_path))?;

        file.write_all(&json)
            .context("Failed to write favorite identities")?;
        file.sync_all().context("Failed to sync favorite store")?;

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to rename {:?} to {:?}", temp_path, self.path))?;

        debug!(count = ids.len(), "Saved favorite identities");
        Ok(())
    }
}
