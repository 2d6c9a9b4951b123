//! Core application functionality
//!
//! This module contains the application layer around the pipeline:
//! - CLI handling and the user settings file
//! - Settings resolution
//! - Error types and fatal error reporting
//! - The build runner

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;
pub mod settings;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use errors::BuildError;
pub use runner::{build_project, run_app, run_build};
pub use settings::BuildSettings;
