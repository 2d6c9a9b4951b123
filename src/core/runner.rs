//! Application runner logic
//!
//! Resolves settings, sets up logging and runs one build from metadata to
//! artifact.

use crate::assembly::FontProjectBuilder;
use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::core::errors::BuildError;
use crate::core::settings::BuildSettings;
use crate::data::{writer_for, OutlineSource, SvgShapeLoader};
use crate::font_source::{parse_descriptions, FontProject};
use crate::logging::{self, LogOptions};
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Run the application with the given CLI arguments.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    cli_args.validate().map_err(anyhow::Error::msg)?;

    // An explicit --config must load; the default one is best effort
    let (config, config_problem) = match &cli_args.config {
        Some(path) => (ConfigFile::load_from(path)?, None),
        None => match ConfigFile::load() {
            Ok(config) => (config.unwrap_or_default(), None),
            Err(e) => (ConfigFile::default(), Some(e)),
        },
    };
    let settings = BuildSettings::resolve(&cli_args, &config);

    let _log_guard = logging::init(LogOptions {
        verbose: cli_args.verbose,
        quiet: cli_args.quiet,
        log_file: settings.log_file,
    })?;
    if let Some(e) = config_problem {
        warn!("Ignoring user settings: {e:#}");
    }
    debug!("Build settings: {settings:?}");

    run_build(&settings)
}

/// Read the metadata, assemble the project and write the artifact
pub fn run_build(settings: &BuildSettings) -> Result<()> {
    let document = read_input(settings.input.as_deref())?;
    let loader = SvgShapeLoader::new(&settings.shapes_dir);
    let project = build_project(&document, settings, &loader)?;

    let writer = writer_for(settings.format);
    writer.write_project(&project, &settings.destination)?;
    info!(
        "Wrote {} as {:?} to {}",
        project.identity.internal_name, settings.format, settings.destination
    );
    Ok(())
}

/// Parse a metadata document and assemble it into a project
pub fn build_project<S: OutlineSource>(
    document: &str,
    settings: &BuildSettings,
    source: &S,
) -> Result<FontProject, BuildError> {
    let descriptions = parse_descriptions(document)?;
    debug!("Read {} glyph descriptions", descriptions.len());
    FontProjectBuilder::for_policy(settings.identity, &settings.family_name)
        .build(&descriptions, source)
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read glyph metadata from {}", path.display())),
        None => {
            let mut document = String::new();
            io::stdin()
                .read_to_string(&mut document)
                .context("Failed to read glyph metadata from standard input")?;
            Ok(document)
        }
    }
}
