//! CLI configuration

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// CLI configuration, loaded from `CATALOG_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Catalog list endpoint
    #[serde(default = "default_fetch_url")]
    pub fetch_url: String,

    /// Product submission endpoint
    #[serde(default = "default_submit_url")]
    pub submit_url: String,

    /// Directory holding the offline queue and favorite set
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Address probed to determine connectivity
    #[serde(default = "default_probe_addr")]
    pub probe_addr: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_fetch_url() -> String {
    "https://app.getswipe.in/api/public/get".to_string()
}

fn default_submit_url() -> String {
    "https://app.getswipe.in/api/public/add".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs_next::data_dir()
        .map(|dir| dir.join("catalog-sync"))
        .unwrap_or_else(|| PathBuf::from(".catalog-sync"))
}

fn default_probe_addr() -> String {
    "app.getswipe.in:443".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl CliConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("CATALOG"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| CliConfig {
            fetch_url: default_fetch_url(),
            submit_url: default_submit_url(),
            data_dir: default_data_dir(),
            probe_addr: default_probe_addr(),
            request_timeout_secs: default_request_timeout(),
        }))
    }

    pub fn offline_store_path(&self) -> PathBuf {
        self.data_dir.join("pending.json")
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir.join("favorites.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::load().unwrap();
        assert!(config.fetch_url.ends_with("/get"));
        assert!(config.submit_url.ends_with("/add"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_store_paths_share_data_dir() {
        let config = CliConfig::load().unwrap();
        assert_eq!(
            config.offline_store_path().parent(),
            config.favorites_path().parent()
        );
    }
}
