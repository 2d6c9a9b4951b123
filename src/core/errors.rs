//! Error types for the font project pipeline
//!
//! Every failure in the pipeline is fatal for the whole build. The variants
//! name the offending glyph, resource or codepoint so the diagnostic printed
//! by [`crate::core::platform::handle_error`] is actionable on its own.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading metadata, loading outlines, assembling the
/// glyph table or writing the finished artifact.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The shape file referenced by an ink-bearing glyph does not exist.
    #[error("shape '{basename}' not found at {}", path.display())]
    ResourceNotFound { basename: String, path: PathBuf },

    /// The shape file exists but could not be read.
    #[error("shape '{basename}' could not be read from {}: {source}", path.display())]
    ResourceUnreadable {
        basename: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The shape file could not be parsed into well-formed contours.
    #[error("shape '{basename}' has malformed geometry ({}): {reason}", path.display())]
    MalformedGeometry {
        basename: String,
        path: PathBuf,
        reason: String,
    },

    /// Two descriptions claim the same codepoint.
    #[error("codepoint U+{codepoint:04X} is claimed by both '{first}' and '{second}'")]
    DuplicateCodepoint {
        codepoint: u32,
        first: String,
        second: String,
    },

    /// A description is missing a required field or has a malformed one.
    #[error("glyph description #{index} ('{basename}') is invalid: {reason}")]
    InvalidGlyphDescription {
        index: usize,
        basename: String,
        reason: String,
    },

    /// The input document is not a JSON array of descriptions.
    #[error("glyph metadata is not a valid JSON array: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// The artifact could not be staged or written to its destination.
    #[error("failed to write font project to {destination}: {source}")]
    ArtifactWriteFailed {
        destination: String,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// Short name of the failure kind, used as the diagnostic tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ResourceNotFound { .. } => "ResourceNotFound",
            Self::ResourceUnreadable { .. } => "ResourceUnreadable",
            Self::MalformedGeometry { .. } => "MalformedGeometry",
            Self::DuplicateCodepoint { .. } => "DuplicateCodepoint",
            Self::InvalidGlyphDescription { .. } => "InvalidGlyphDescription",
            Self::InvalidInput(_) => "InvalidInput",
            Self::ArtifactWriteFailed { .. } => "ArtifactWriteFailed",
        }
    }

    pub(crate) fn write_failed(destination: impl Into<String>, source: io::Error) -> Self {
        Self::ArtifactWriteFailed {
            destination: destination.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_codepoint_message_names_both_glyphs() {
        let error = BuildError::DuplicateCodepoint {
            codepoint: 0x41,
            first: "A".to_string(),
            second: "A.alt".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("U+0041"));
        assert!(message.contains("'A'"));
        assert!(message.contains("'A.alt'"));
        assert_eq!(error.kind(), "DuplicateCodepoint");
    }

    #[test]
    fn test_write_failure_keeps_io_cause() {
        let error = BuildError::write_failed(
            "out.sfd",
            io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        );
        let source = std::error::Error::source(&error).expect("io cause");
        assert_eq!(source.to_string(), "read-only");
    }
}
