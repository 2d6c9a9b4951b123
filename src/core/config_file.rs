//! User configuration file handling
//!
//! Manages settings from ~/.config/fontasm/settings.json

use crate::data::OutputFormat;
use crate::font_source::IdentityPolicy;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration from ~/.config/fontasm/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory holding `<basename>.svg` shapes
    pub shapes_dir: Option<PathBuf>,
    /// Family name written into the font
    pub family_name: Option<String>,
    /// "fixed" or "timestamped"
    pub identity: Option<IdentityPolicy>,
    /// "sfd" or "ufo"
    pub format: Option<OutputFormat>,
    /// Also write logs to the logs directory
    pub log_file: Option<bool>,
}

impl ConfigFile {
    /// Get the path to the fontasm config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("fontasm")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load the user config file, if there is one
    pub fn load() -> anyhow::Result<Option<Self>> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Load configuration from an explicit settings file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{
                "shapes_dir": "shapes",
                "family_name": "Test Sans",
                "identity": "timestamped",
                "format": "ufo",
                "log_file": true
            }"#,
        )
        .unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.shapes_dir, Some(PathBuf::from("shapes")));
        assert_eq!(config.family_name.as_deref(), Some("Test Sans"));
        assert_eq!(config.identity, Some(IdentityPolicy::Timestamped));
        assert_eq!(config.format, Some(OutputFormat::Ufo));
        assert_eq!(config.log_file, Some(true));
    }

    #[test]
    fn test_partial_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"identity": "fixed"}"#).unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.identity, Some(IdentityPolicy::Fixed));
        assert!(config.shapes_dir.is_none());
        assert!(config.format.is_none());
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"default_theme": "dark"}"#).unwrap();

        let error = ConfigFile::load_from(&path).unwrap_err();
        assert!(format!("{error:#}").contains("Failed to parse settings file"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigFile::load_from(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_paths_share_config_dir() {
        let dir = ConfigFile::config_dir();
        assert!(dir.ends_with("fontasm"));
        assert_eq!(ConfigFile::config_path(), dir.join("settings.json"));
        assert_eq!(ConfigFile::logs_dir(), dir.join("logs"));
    }
}
