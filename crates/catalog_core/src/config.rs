//! Process configuration for catalog entry points.
//!
//! Values come from the command line (which also reads the `CATALOG_*`
//! environment variables); blank values are treated as unset.

use crate::logging::default_log_level;
use std::path::PathBuf;

const DEFAULT_DB_FILE_NAME: &str = "catalog.sqlite3";

/// Runtime settings for catalog entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// SQLite file holding the catalog.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging starts only when a directory is configured.
    pub log_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CatalogConfig {
    /// Layers the supplied values over [`CatalogConfig::default`].
    pub fn resolve(
        db_path: Option<PathBuf>,
        log_level: Option<String>,
        log_dir: Option<PathBuf>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            db_path: non_blank_path(db_path).unwrap_or(defaults.db_path),
            log_level: log_level
                .map(|level| level.trim().to_string())
                .filter(|level| !level.is_empty())
                .unwrap_or(defaults.log_level),
            log_dir: non_blank_path(log_dir),
        }
    }
}

fn non_blank_path(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|path| !path.as_os_str().to_string_lossy().trim().is_empty())
}
