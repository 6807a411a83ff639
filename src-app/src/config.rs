//! Application Configuration
//!
//! A JSON file where every field is optional. A missing file means all
//! defaults; a malformed one is an error.

use inspection_checklist::template::{DEFAULT_INSPECTION_ID, DEFAULT_PROPERTY};
use inspection_checklist::PhotoItem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{StoreError, StoreResult};

/// Names the config file for the binary
pub const CONFIG_ENV: &str = "INSPECTION_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "inspection.json";
const DB_FILE: &str = "inspections.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub inspection_id: String,
    pub property: String,
    pub debounce_ms: u64,
    pub load_timeout_ms: u64,
    pub remote: Option<RemoteConfig>,
    /// Fixed gallery; takes precedence over `photo_storage`
    pub gallery: Vec<PhotoItem>,
    pub photo_storage: Option<PhotoStorageConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            inspection_id: DEFAULT_INSPECTION_ID.to_string(),
            property: DEFAULT_PROPERTY.to_string(),
            debounce_ms: 1000,
            load_timeout_ms: 5000,
            remote: None,
            gallery: Vec::new(),
            photo_storage: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "luxe_inspections".to_string()
}

/// Public storage folder holding numbered photos per property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoStorageConfig {
    pub base_url: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_prefix() -> String {
    "Foto".to_string()
}

fn default_count() -> usize {
    30
}

impl AppConfig {
    pub fn load(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| StoreError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from the file named by `INSPECTION_CONFIG`, else `inspection.json`
    pub fn from_env() -> StoreResult<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load(&path)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.debounce(), Duration::from_millis(1000));
        assert_eq!(config.load_timeout(), Duration::from_millis(5000));
        assert_eq!(config.db_path(), PathBuf::from("data").join("inspections.db"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "property": "Casa Azul", "debounce_ms": 250,
                 "remote": { "base_url": "https://db.test", "api_key": "k" } }"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.property, "Casa Azul");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.load_timeout_ms, 5000);
        assert_eq!(config.inspection_id, DEFAULT_INSPECTION_ID);
        assert_eq!(config.remote.unwrap().table, "luxe_inspections");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_photo_storage_defaults() {
        let storage: PhotoStorageConfig = serde_json::from_str(r#"{ "base_url": "https://cdn.test" }"#).unwrap();
        assert_eq!(storage.prefix, "Foto");
        assert_eq!(storage.count, 30);
    }
}
