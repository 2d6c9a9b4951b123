//! Project writer interface and artifact staging
//!
//! A writer renders a finished [`FontProject`] and delivers it to a
//! [`Destination`]. Nothing reaches the destination until the artifact is
//! complete: file output is staged in a scratch file next to the target and
//! moved into place, standard output only receives a fully staged file.
//! Scratch storage is released on every exit path.

use crate::core::errors::BuildError;
use crate::data::{SfdWriter, UfoWriter};
use crate::font_source::FontProject;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Where the finished artifact goes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    Path(PathBuf),
}

impl Destination {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::Path)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => write!(f, "standard output"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Font-source formats the project can be written as
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// FontForge spline font database text
    #[default]
    Sfd,
    /// Unified Font Object directory
    Ufo,
}

/// Serializes a finished font project
pub trait ProjectWriter {
    /// Write the whole project to the destination, or nothing at all
    fn write_project(
        &self,
        project: &FontProject,
        destination: &Destination,
    ) -> Result<(), BuildError>;
}

/// Writer for the requested format
pub fn writer_for(format: OutputFormat) -> Box<dyn ProjectWriter> {
    match format {
        OutputFormat::Sfd => Box::new(SfdWriter),
        OutputFormat::Ufo => Box::new(UfoWriter),
    }
}

/// Deliver a rendered single-file artifact to its destination
///
/// The bytes are first written to a scratch file. For a path destination
/// the scratch file lives in the target's directory and is renamed over the
/// target; for standard output it lives in a private temporary directory
/// and is streamed once complete.
pub fn deliver_staged(bytes: &[u8], destination: &Destination) -> Result<(), BuildError> {
    let fail = |source| BuildError::write_failed(destination.to_string(), source);

    match destination {
        Destination::Path(path) => {
            let mut staged = NamedTempFile::new_in(parent_dir(path)).map_err(fail)?;
            staged.write_all(bytes).map_err(fail)?;
            staged.as_file().sync_all().map_err(fail)?;
            staged.persist(path).map_err(|e| fail(e.error))?;
            debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        Destination::Stdout => {
            let scratch = tempfile::tempdir().map_err(fail)?;
            let staged_path = scratch.path().join("out.sfd");
            fs::write(&staged_path, bytes).map_err(fail)?;

            let mut staged = fs::File::open(&staged_path).map_err(fail)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            io::copy(&mut staged, &mut out).map_err(fail)?;
            out.flush().map_err(fail)?;
            // `scratch` is removed when it goes out of scope, on error paths too
        }
    }
    Ok(())
}

/// Directory a destination path lives in, `.` for bare file names
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
