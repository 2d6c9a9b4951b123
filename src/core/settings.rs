//! Resolved build settings
//!
//! Priority order for every option:
//! 1. CLI argument
//! 2. Config file setting (~/.config/fontasm/settings.json or --config)
//! 3. Built-in default

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::data::{Destination, OutputFormat, DEFAULT_SHAPES_DIR};
use crate::font_source::{IdentityPolicy, DEFAULT_FAMILY_NAME};
use std::path::PathBuf;

/// Everything a build needs, with every choice made
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSettings {
    /// Metadata document, standard input when `None`
    pub input: Option<PathBuf>,
    pub destination: Destination,
    pub shapes_dir: PathBuf,
    pub family_name: String,
    pub identity: IdentityPolicy,
    pub format: OutputFormat,
    pub log_file: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            input: None,
            destination: Destination::Stdout,
            shapes_dir: PathBuf::from(DEFAULT_SHAPES_DIR),
            family_name: DEFAULT_FAMILY_NAME.to_string(),
            identity: IdentityPolicy::default(),
            format: OutputFormat::default(),
            log_file: false,
        }
    }
}

impl BuildSettings {
    pub fn resolve(cli: &CliArgs, config: &ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            input: cli.input.clone(),
            destination: Destination::from_option(cli.output.clone()),
            shapes_dir: cli
                .shapes_dir
                .clone()
                .or_else(|| config.shapes_dir.clone())
                .unwrap_or(defaults.shapes_dir),
            family_name: cli
                .family_name
                .clone()
                .or_else(|| config.family_name.clone())
                .unwrap_or(defaults.family_name),
            identity: cli.identity.or(config.identity).unwrap_or(defaults.identity),
            format: cli.format.or(config.format).unwrap_or(defaults.format),
            log_file: cli.log_file || config.log_file.unwrap_or(defaults.log_file),
        }
    }
}
