//! Dotted property paths and their segment grammar.

use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};

/// An ordered, non-empty list of key segments identifying a location in a
/// node tree, usually written dot-separated (`"log.level"`).
///
/// Each segment must start with an ASCII letter, digit or underscore and
/// may continue with ASCII letters, digits, `_`, `.` or `-`. A path parsed
/// from a dotted string never contains `.` inside a segment; pre-split
/// segments supplied through [`PropertyPath::from_segments`] may.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    /// Parses a dotted path string into its segments.
    pub fn parse(path: &str) -> Result<Self> {
        if path.trim().is_empty() {
            return Err(ModelError::InvalidPath(
                "the property path cannot be empty".to_string(),
            ));
        }
        Self::from_segments(path.split('.'))
    }

    /// Builds a path from pre-split segments, validating each one.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(ModelError::InvalidPath(
                "the property path cannot be empty".to_string(),
            ));
        }
        for segment in &segments {
            if !is_valid_segment(segment) {
                return Err(ModelError::InvalidPath(format!(
                    "segment '{segment}' is not a valid property name"
                )));
            }
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The terminal segment.
    pub fn last(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Every segment except the terminal one.
    pub fn parents(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for PropertyPath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Segment grammar: `^[0-9A-Za-z_][0-9A-Za-z_.-]*$`.
fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}
