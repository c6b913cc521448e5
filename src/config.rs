//! Cairn configuration.
//!
//! Loaded from `~/.cairn/config.toml`. Every key is optional; a missing
//! file yields the defaults, which point at a local MongoDB.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Cairn configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// MongoDB connection string.
    pub uri: String,

    /// Database holding the POI collection.
    pub database: String,

    /// Collection name.
    pub collection: String,

    /// Directory scanned for the image picker. Defaults to the platform
    /// pictures directory.
    pub gallery_dir: Option<PathBuf>,

    /// Log file path. Defaults to `~/.cairn/cairn.log`.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".into(),
            database: "cairn".into(),
            collection: "pois".into(),
            gallery_dir: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Load config from an explicit path, or from `~/.cairn/config.toml`.
    ///
    /// An explicit path must exist; the default path may be absent, in
    /// which case the defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (
                Self::path().ok_or("could not determine home directory")?,
                false,
            ),
        };

        if !path.exists() {
            if required {
                return Err(format!("no config file found at {}", path.display()));
            }
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The default config file path: `~/.cairn/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".cairn").join("config.toml"))
    }

    /// Where log lines go: the configured file, or `~/.cairn/cairn.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::home_dir().map(|h| h.join(".cairn").join("cairn.log"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_default_config_falls_back_to_defaults() {
        let config = Config::default();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "cairn");
        assert_eq!(config.collection, "pois");
        assert!(config.gallery_dir.is_none());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "database = \"geo\"\ngallery-dir = \"/srv/photos\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "geo");
        assert_eq!(config.collection, "pois");
        assert_eq!(config.gallery_dir, Some(PathBuf::from("/srv/photos")));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "uri = [").unwrap();

        let result = Config::load(Some(&path));
        assert!(result.unwrap_err().contains("invalid config"));
    }

    #[test]
    fn log_path_prefers_the_configured_file() {
        let config = Config {
            log_file: Some(PathBuf::from("/tmp/cairn.log")),
            ..Config::default()
        };
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/cairn.log")));
    }
}
