//! Command line interface for fontasm
//!
//! Handles parsing command line arguments and provides
//! validation for user inputs. Options that also exist in the config file
//! are optional here so the config file can fill them in.

use crate::data::OutputFormat;
use crate::font_source::IdentityPolicy;
use clap::Parser;
use std::path::PathBuf;

/// fontasm CLI arguments
///
/// Examples:
///   fontasm < meta.json > out.sfd                # Build from stdin to stdout
///   fontasm -i meta.json -o out.sfd              # Build between files
///   fontasm -i meta.json -s shapes/ -o out.sfd   # Use another shapes directory
///   fontasm -i meta.json --identity timestamped  # Give this build a unique name
///   fontasm -i meta.json -f ufo -o Font.ufo      # Write a UFO instead of SFD
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "fontasm",
    version,
    about = "Assemble a font project source from glyph metadata and SVG outlines",
    long_about = "fontasm reads a JSON array of glyph descriptions, loads and simplifies the SVG outline of every ink-bearing glyph, and writes one font-source artifact (FontForge SFD or UFO). Nothing is written unless the whole project assembles."
)]
pub struct CliArgs {
    /// Glyph metadata JSON document
    #[clap(
        long = "input",
        short = 'i',
        help = "Glyph metadata JSON (default: standard input)",
        long_help = "Path to the glyph metadata JSON document: an array of {\"file_basename\", \"loose\": {\"codepoint\", \"width\", \"lines\"}} entries. Read from standard input when omitted."
    )]
    pub input: Option<PathBuf>,

    /// Destination of the finished artifact
    #[clap(
        long = "output",
        short = 'o',
        help = "Output path (default: standard output)",
        long_help = "Path the finished font source is written to. The artifact is staged next to it and moved into place only after the build succeeded. Defaults to standard output for SFD; UFO output always needs a path."
    )]
    pub output: Option<PathBuf>,

    /// Directory holding `<basename>.svg` shape files
    #[clap(
        long = "shapes-dir",
        short = 's',
        help = "Directory of SVG shapes (default: tight-shapes)"
    )]
    pub shapes_dir: Option<PathBuf>,

    /// Naming policy for the built font
    #[clap(
        long = "identity",
        value_enum,
        help = "Font naming policy: fixed or timestamped",
        long_help = "fixed gives every build the same names, so identical inputs give identical artifacts. timestamped appends the UTC build time to the internal name so every build is distinguishable."
    )]
    pub identity: Option<IdentityPolicy>,

    /// Family name written into the font
    #[clap(long = "family-name", help = "Family name (default: STDevGen_1stMix)")]
    pub family_name: Option<String>,

    /// Output format
    #[clap(long = "format", short = 'f', value_enum, help = "Output format: sfd or ufo")]
    pub format: Option<OutputFormat>,

    /// Alternate settings file
    #[clap(
        long = "config",
        help = "Settings file to use instead of ~/.config/fontasm/settings.json"
    )]
    pub config: Option<PathBuf>,

    /// Write logs to daily files under the config directory as well
    #[clap(
        long = "log-file",
        help = "Also write logs to ~/.config/fontasm/logs/"
    )]
    pub log_file: bool,

    /// More diagnostics on stderr, repeat for more
    #[clap(
        long = "verbose",
        short = 'v',
        action = clap::ArgAction::Count,
        conflicts_with = "quiet",
        help = "Increase log verbosity (-v debug, -vv trace)"
    )]
    pub verbose: u8,

    /// Only report errors
    #[clap(long = "quiet", short = 'q', help = "Only print errors")]
    pub quiet: bool,
}

impl CliArgs {
    /// Validate the CLI arguments after parsing
    ///
    /// This ensures that given paths exist before any work starts,
    /// providing clear error messages for common mistakes.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.input {
            if !path.is_file() {
                return Err(format!(
                    "Input file does not exist: {}\nMake sure the path is correct and the file exists.",
                    path.display()
                ));
            }
        }

        if let Some(path) = &self.config {
            if !path.is_file() {
                return Err(format!("Config file does not exist: {}", path.display()));
            }
        }

        if self.format == Some(OutputFormat::Ufo) && self.output.is_none() {
            return Err(
                "UFO output is a directory and cannot go to standard output\nPass --output <path>.ufo"
                    .to_string(),
            );
        }

        Ok(())
    }
}
