//! UFO file I/O operations

use crate::core::errors::BuildError;
use crate::data::writer::{parent_dir, Destination, ProjectWriter};
use crate::font_source::FontProject;
use norad::Font;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Default)]
pub struct UfoWriter;

impl ProjectWriter for UfoWriter {
    /// Save a UFO into a scratch directory beside the destination, then swap
    /// it in for the destination
    fn write_project(
        &self,
        project: &FontProject,
        destination: &Destination,
    ) -> Result<(), BuildError> {
        let fail = |source| BuildError::write_failed(destination.to_string(), source);

        let Destination::Path(path) = destination else {
            return Err(fail(io::Error::new(
                io::ErrorKind::Unsupported,
                "UFO output is a directory and needs an output path",
            )));
        };

        let font = to_norad_font(project);
        let scratch = tempfile::Builder::new()
            .prefix(".fontasm-")
            .tempdir_in(parent_dir(path))
            .map_err(fail)?;
        let staged = scratch.path().join("staged.ufo");
        font.save(&staged).map_err(|e| fail(io::Error::other(e)))?;

        let previous = scratch.path().join("previous.ufo");
        replace_dir(&staged, path, &previous).map_err(fail)?;
        // The displaced destination is removed along with `scratch`
        debug!("Saved UFO with {} glyphs to {}", project.glyphs.len(), path.display());
        Ok(())
    }
}

/// Convert a project to a complete norad Font
pub fn to_norad_font(project: &FontProject) -> Font {
    let mut font = Font::new();
    font.font_info = project.metrics.to_norad_font_info(&project.identity);

    // Add glyphs to the default layer
    let layer = font.default_layer_mut();
    for glyph_data in project.glyphs.values() {
        layer.insert_glyph(glyph_data.to_norad_glyph());
    }

    font
}

/// Move `staged` to `path`, parking whatever was at `path` at `backup`
///
/// When the final rename fails the parked destination is moved back, so the
/// destination ends up either fully replaced or untouched.
fn replace_dir(staged: &Path, path: &Path, backup: &Path) -> io::Result<()> {
    let displaced = match fs::symlink_metadata(path) {
        Ok(_) => {
            fs::rename(path, backup)?;
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(e),
    };

    if let Err(error) = fs::rename(staged, path) {
        if displaced {
            if let Err(restore) = fs::rename(backup, path) {
                warn!("Could not restore {}: {restore}", path.display());
            }
        }
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{
        ContourData, FontIdentity, FontMetrics, GlyphData, OutlineData, PointData, PointTypeData,
    };

    fn sample_project() -> FontProject {
        let triangle = ContourData {
            points: vec![
                PointData::new(0.0, 0.0, PointTypeData::Line),
                PointData::new(100.0, 0.0, PointTypeData::Line),
                PointData::new(50.0, 100.0, PointTypeData::Line),
            ],
        };
        let glyphs = [
            GlyphData {
                codepoint: ' ',
                name: "uni0020".to_string(),
                basename: "space".to_string(),
                advance_width: 600,
                outline: None,
            },
            GlyphData {
                codepoint: 'A',
                name: "uni0041".to_string(),
                basename: "A".to_string(),
                advance_width: 700,
                outline: Some(OutlineData {
                    contours: vec![triangle],
                }),
            },
        ];
        FontProject {
            identity: FontIdentity::fixed("Test"),
            metrics: FontMetrics::default(),
            glyphs: glyphs.into_iter().map(|g| (g.codepoint, g)).collect(),
        }
    }

    #[test]
    fn test_norad_font_has_every_glyph() {
        let font = to_norad_font(&sample_project());
        let layer = font.default_layer();
        assert_eq!(layer.len(), 2);
        let a = layer.get_glyph("uni0041").expect("glyph A");
        assert_eq!(a.width, 700.0);
        assert_eq!(a.contours.len(), 1);
        let space = layer.get_glyph("uni0020").expect("space");
        assert!(space.contours.is_empty());
        assert_eq!(font.font_info.family_name.as_deref(), Some("Test"));
    }

    #[test]
    fn test_write_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Test.ufo");
        fs::create_dir_all(target.join("stale")).unwrap();

        UfoWriter
            .write_project(&sample_project(), &Destination::Path(target.clone()))
            .unwrap();

        let font = Font::load(&target).expect("load written UFO");
        assert_eq!(font.default_layer().len(), 2);
        assert!(!target.join("stale").exists());
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "scratch directory should be gone");
    }

    #[test]
    fn test_stdout_is_rejected() {
        let error = UfoWriter
            .write_project(&sample_project(), &Destination::Stdout)
            .unwrap_err();
        assert_eq!(error.kind(), "ArtifactWriteFailed");
    }

    #[test]
    fn test_failed_swap_restores_destination() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Test.ufo");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("metainfo.plist"), "old").unwrap();
        let scratch = tempfile::tempdir_in(dir.path()).unwrap();

        // Nothing was staged, so moving it into place fails
        let error = replace_dir(
            &scratch.path().join("staged.ufo"),
            &target,
            &scratch.path().join("previous.ufo"),
        )
        .unwrap_err();

        assert_eq!(error.kind(), io::ErrorKind::NotFound);
        assert_eq!(fs::read_to_string(target.join("metainfo.plist")).unwrap(), "old");
        assert!(!scratch.path().join("previous.ufo").exists());
    }

    #[test]
    fn test_swap_into_empty_destination() {
        let dir = tempfile::tempdir().unwrap();
        let staged = dir.path().join("staged.ufo");
        fs::create_dir_all(&staged).unwrap();
        let target = dir.path().join("Test.ufo");

        replace_dir(&staged, &target, &dir.path().join("previous.ufo")).unwrap();

        assert!(target.is_dir());
        assert!(!staged.exists());
        assert!(!dir.path().join("previous.ufo").exists());
    }
}
