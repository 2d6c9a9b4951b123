//! Glyph metadata input
//!
//! The input document is a JSON array of entries shaped like
//!
//! ```json
//! {"file_basename": "A", "loose": {"codepoint": 65, "width": 700, "lines": [{"draw": true}]}}
//! ```
//!
//! Entries without a codepoint describe non-character artifacts; they are
//! kept as descriptions with `codepoint: None` and the rest of their fields,
//! the basename included, are not validated.

use crate::core::errors::BuildError;
use serde_json::Value;

/// One line (stroke group) of a glyph; only whether it draws matters here
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSpec {
    pub draw: bool,
}

impl Default for LineSpec {
    fn default() -> Self {
        Self { draw: true }
    }
}

/// A glyph as described by the input metadata
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphDescription {
    pub basename: String,
    pub codepoint: Option<char>,
    pub width: u32,
    pub lines: Vec<LineSpec>,
}

impl GlyphDescription {
    /// True when at least one line draws ink
    pub fn has_ink(&self) -> bool {
        self.lines.iter().any(|line| line.draw)
    }
}

/// Parse the whole metadata document
pub fn parse_descriptions(document: &str) -> Result<Vec<GlyphDescription>, BuildError> {
    let entries: Vec<Value> = serde_json::from_str(document)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, value)| parse_entry(index, value))
        .collect()
}

fn parse_entry(index: usize, value: Value) -> Result<GlyphDescription, BuildError> {
    let basename = value.get("file_basename");
    let codepoint = value.get("loose").and_then(|loose| loose.get("codepoint"));

    // Nothing else is checked on entries without a codepoint
    let codepoint = match codepoint {
        None | Some(Value::Null) => {
            let label = basename.and_then(Value::as_str).unwrap_or("<unnamed>");
            return Ok(GlyphDescription {
                basename: label.to_string(),
                codepoint: None,
                width: 0,
                lines: Vec::new(),
            });
        }
        Some(codepoint) => codepoint,
    };

    let basename = match basename {
        Some(Value::String(name)) => name.clone(),
        Some(other) => {
            let reason = format!("'file_basename' {other} is not a string");
            return Err(invalid(index, "<unnamed>", reason));
        }
        None => return Err(invalid(index, "<unnamed>", "missing 'file_basename'")),
    };
    let codepoint = parse_codepoint(codepoint).ok_or_else(|| {
        invalid(index, &basename, format!("codepoint {codepoint} is not a Unicode scalar value"))
    })?;

    let Some(loose) = value.get("loose").and_then(Value::as_object) else {
        return Err(invalid(index, &basename, "'loose' is not an object"));
    };

    let width = match loose.get("width") {
        None | Some(Value::Null) => 0,
        Some(value) => parse_width(value).ok_or_else(|| {
            invalid(index, &basename, format!("width {value} is not a non-negative integer"))
        })?,
    };

    let lines = match loose.get("lines") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(line_index, item)| {
                parse_line(item).ok_or_else(|| {
                    invalid(index, &basename, format!("line {line_index} has a non-boolean 'draw'"))
                })
            })
            .collect::<Result<Vec<_>, BuildError>>()?,
        Some(_) => return Err(invalid(index, &basename, "'lines' is not an array")),
    };

    Ok(GlyphDescription {
        basename,
        codepoint: Some(codepoint),
        width,
        lines,
    })
}

fn parse_codepoint(value: &Value) -> Option<char> {
    let raw = value.as_u64()?;
    u32::try_from(raw).ok().and_then(char::from_u32)
}

/// Widths may arrive as integral floats from some generators
fn parse_width(value: &Value) -> Option<u32> {
    if let Some(raw) = value.as_u64() {
        return u32::try_from(raw).ok();
    }
    let raw = value.as_f64()?;
    if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= u32::MAX as f64 {
        Some(raw as u32)
    } else {
        None
    }
}

fn parse_line(value: &Value) -> Option<LineSpec> {
    let line = value.as_object()?;
    match line.get("draw") {
        None | Some(Value::Null) => Some(LineSpec::default()),
        Some(Value::Bool(draw)) => Some(LineSpec { draw: *draw }),
        Some(_) => None,
    }
}

fn invalid(index: usize, basename: &str, reason: impl Into<String>) -> BuildError {
    BuildError::InvalidGlyphDescription {
        index,
        basename: basename.to_string(),
        reason: reason.into(),
    }
}
