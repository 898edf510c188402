// Application configuration
//
// Loaded once at startup from a JSON file and handed to each component at
// construction. Every key has a default so a missing file yields a usable
// (if empty) configuration; the database URL can be overridden through the
// environment for deployments that keep credentials out of the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RcpError, Result};
use crate::event::PointClassifier;

/// Environment variable that points at the config file
pub const CONFIG_PATH_ENV: &str = "MINIRCP_CONFIG";

/// Environment variable that overrides the configured database URL
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Reader points that register an entry
    pub in_event_ids: Vec<i64>,
    /// Reader points that register an exit
    pub out_event_ids: Vec<i64>,
    /// Path the badge system delivers the events file to
    pub events_file: PathBuf,
    /// Directory that receives numbered copies of processed files
    pub archive_folder: PathBuf,
    /// Ingestion cycle interval
    pub processing_interval_minutes: u64,
    /// SQLite database URL
    pub database_url: String,
    /// Bind address for the reporting API
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            in_event_ids: Vec::new(),
            out_event_ids: Vec::new(),
            events_file: PathBuf::from("PREvents.csv"),
            archive_folder: PathBuf::from("archive"),
            processing_interval_minutes: 30,
            database_url: "sqlite:events.db?mode=rwc".to_string(),
            bind_addr: "0.0.0.0:5000".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the path in `MINIRCP_CONFIG`, falling back to
    /// `config.json` in the working directory. A missing file yields the
    /// defaults; an unreadable or malformed file is an error.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.json".to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&raw)
            .map_err(|e| RcpError::config(format!("{}: {e}", path.display())))?;
        tracing::info!(
            path = %path.display(),
            in_ids = ?config.in_event_ids,
            out_ids = ?config.out_event_ids,
            events_file = %config.events_file.display(),
            archive = %config.archive_folder.display(),
            interval_minutes = config.processing_interval_minutes,
            "configuration loaded"
        );
        Ok(config)
    }

    /// The entry/exit classification sets as a classifier value.
    pub fn classifier(&self) -> PointClassifier {
        PointClassifier::new(self.in_event_ids.iter().copied(), self.out_event_ids.iter().copied())
    }

    /// Database URL, with the `DATABASE_URL` environment variable taking
    /// precedence over the file.
    pub fn database_url(&self) -> String {
        std::env::var(DATABASE_URL_ENV).unwrap_or_else(|_| self.database_url.clone())
    }

    /// Ingestion interval as a duration.
    pub fn processing_interval(&self) -> Duration {
        Duration::from_secs(self.processing_interval_minutes * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.json")).unwrap();
        assert_eq!(config.events_file, PathBuf::from("PREvents.csv"));
        assert_eq!(config.processing_interval_minutes, 30);
        assert!(config.in_event_ids.is_empty());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"in_event_ids": [1, 2], "out_event_ids": [3]}}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.in_event_ids, vec![1, 2]);
        assert_eq!(config.out_event_ids, vec![3]);
        assert_eq!(config.archive_folder, PathBuf::from("archive"));

        let classifier = config.classifier();
        assert!(classifier.is_in(2));
        assert!(classifier.is_out(3));
        assert!(!classifier.is_known(4));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, RcpError::Config(_)));
    }
}
