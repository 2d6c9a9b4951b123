//! Font project building
//!
//! Walks the glyph descriptions in input order, skips the ones without a
//! codepoint, assembles the rest and collects them into the glyph table.

use crate::assembly::glyph::GlyphAssembler;
use crate::core::errors::BuildError;
use crate::data::OutlineSource;
use crate::font_source::{
    FontIdentity, FontMetrics, FontProject, GlyphData, GlyphDescription, IdentityPolicy,
};
use crate::geometry::DEFAULT_TOLERANCE;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::info;

/// Builds a [`FontProject`] from glyph descriptions
#[derive(Clone, Debug)]
pub struct FontProjectBuilder {
    identity: FontIdentity,
    metrics: FontMetrics,
    tolerance: f64,
}

impl FontProjectBuilder {
    pub fn new(identity: FontIdentity) -> Self {
        Self {
            identity,
            metrics: FontMetrics::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Builder whose identity follows the policy, stamped now if timestamped
    pub fn for_policy(policy: IdentityPolicy, family_name: &str) -> Self {
        Self::new(FontIdentity::for_policy(policy, family_name))
    }

    /// Assemble every description with a codepoint, in input order
    ///
    /// Fails on the first loader error, or when two descriptions claim the
    /// same codepoint.
    pub fn build<S: OutlineSource>(
        &self,
        descriptions: &[GlyphDescription],
        source: &S,
    ) -> Result<FontProject, BuildError> {
        let assembler = GlyphAssembler::new(source, self.tolerance);
        let mut glyphs = BTreeMap::new();
        let mut skipped = 0;

        for description in descriptions {
            let Some(codepoint) = description.codepoint else {
                info!("Skipping '{}': no codepoint", description.basename);
                skipped += 1;
                continue;
            };

            match glyphs.entry(codepoint) {
                Entry::Occupied(existing) => {
                    let existing: &GlyphData = existing.get();
                    return Err(BuildError::DuplicateCodepoint {
                        codepoint: codepoint as u32,
                        first: existing.basename.clone(),
                        second: description.basename.clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(assembler.assemble(codepoint, description)?);
                }
            }
        }

        let project = FontProject {
            identity: self.identity.clone(),
            metrics: self.metrics,
            glyphs,
        };
        let spacing_only = project.spacing_only_count();
        info!(
            "Assembled {} glyphs ({} with ink, {} spacing-only), skipped {} without codepoint",
            project.glyphs.len(),
            project.glyphs.len() - spacing_only,
            spacing_only,
            skipped
        );
        Ok(project)
    }
}
