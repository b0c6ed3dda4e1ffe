/// Application configuration
///
/// Loaded once at startup from `config.toml` in the user's config directory:
/// - Linux: ~/.config/item-showcase/config.toml
/// - macOS: ~/Library/Application Support/item-showcase/config.toml
/// - Windows: %APPDATA%\item-showcase\config.toml
///
/// Every key is optional. A missing file means defaults.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Shown whenever an item has no usable image of its own
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://media.istockphoto.com/id/1222357475/vector/image-preview-icon-picture-placeholder-for-website-or-ui-ux-design-vector-illustration.jpg?s=612x612&w=0&k=20&c=KuCo-dRBYV7nz2gbk4J9w1WtTAgpTdznHu55W9FjimE=";

pub const DEFAULT_ENQUIRY_URL: &str = "https://www.google.com/";

pub const DEFAULT_AUTO_ADVANCE_MS: u64 = 5000;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Idle time before the carousel advances on its own, in milliseconds
    pub auto_advance_ms: u64,
    /// Opened by the "Enquire" button in the expanded view
    pub enquiry_url: String,
    /// Image reference used for items without an image
    pub placeholder_image: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: DEFAULT_AUTO_ADVANCE_MS,
            enquiry_url: DEFAULT_ENQUIRY_URL.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl AppConfig {
    /// Load the config from the user's config directory, falling back to
    /// defaults (with a warning) if the file is unreadable or invalid
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(Some(config)) => {
                tracing::info!("⚙️  Loaded config from {}", path.display());
                config
            }
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("⚠️  {e}; using defaults");
                Self::default()
            }
        }
    }

    /// Read a config file. `Ok(None)` if it does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&raw)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }

    fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("item-showcase");
        path.push("config.toml");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.auto_advance(), Duration::from_millis(5000));
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::parse("auto_advance_ms = 1500\n").unwrap();
        assert_eq!(config.auto_advance_ms, 1500);
        assert_eq!(config.enquiry_url, DEFAULT_ENQUIRY_URL);
        assert_eq!(config.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(AppConfig::parse("autoadvance = 3").is_err());
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "auto_advance_ms = \"soon\"").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
