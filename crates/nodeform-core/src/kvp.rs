//! Line-oriented `key=value` codec.
//!
//! Export flattens the tree through the shared traversal, joining each
//! leaf's path with the configured separator into one line per leaf.
//! Import splits every line on the first `=` (a line without one yields a
//! null value) and writes the value at the separator-split path.

use std::io::{BufRead, Write};

use crate::error::{ModelError, Result};
use crate::format::{CancelToken, Format, FormatOptions, NameConverter};
use crate::node::Node;
use crate::path::PropertyPath;
use crate::value::NodeValue;

/// Options for [`KeyValuePairsFormat`]. The separator and line terminator
/// must not contain `=`, and the line format must carry both placeholders;
/// the `Result`-returning setters enforce this at construction time.
#[derive(Debug, Clone)]
pub struct KeyValuePairsFormatOptions {
    format: FormatOptions,
    separator: String,
    line_terminator: String,
    line_format: String,
}

impl Default for KeyValuePairsFormatOptions {
    fn default() -> Self {
        Self {
            format: FormatOptions::default(),
            separator: ".".to_string(),
            line_terminator: "\n".to_string(),
            line_format: "{key}={value}".to_string(),
        }
    }
}

impl KeyValuePairsFormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_converter(mut self, converter: NameConverter) -> Self {
        self.format.property_name_converter = Some(converter);
        self
    }

    /// Separator joining path segments in exported keys and splitting them
    /// back apart on import. Must be non-empty and free of `=`.
    pub fn separator(mut self, separator: impl Into<String>) -> Result<Self> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(ModelError::InvalidOption(
                "the property name separator cannot be empty".to_string(),
            ));
        }
        if separator.contains('=') {
            return Err(ModelError::InvalidOption(
                "the property name separator cannot contain '='".to_string(),
            ));
        }
        self.separator = separator;
        Ok(self)
    }

    /// Written after every exported line. Must be free of `=`.
    pub fn line_terminator(mut self, terminator: impl Into<String>) -> Result<Self> {
        let terminator = terminator.into();
        if terminator.contains('=') {
            return Err(ModelError::InvalidOption(
                "the line terminator cannot contain '='".to_string(),
            ));
        }
        self.line_terminator = terminator;
        Ok(self)
    }

    /// Template for every exported line. Must contain both `{key}` and
    /// `{value}`.
    pub fn line_format(mut self, template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains("{key}") || !template.contains("{value}") {
            return Err(ModelError::InvalidOption(
                "the line format must contain the {key} and {value} placeholders".to_string(),
            ));
        }
        self.line_format = template;
        Ok(self)
    }
}

/// Imports and exports one `key=value` line per leaf.
#[derive(Debug, Clone, Default)]
pub struct KeyValuePairsFormat {
    options: KeyValuePairsFormatOptions,
}

impl KeyValuePairsFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: KeyValuePairsFormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &KeyValuePairsFormatOptions {
        &self.options
    }
}

impl Format for KeyValuePairsFormat {
    fn name(&self) -> &'static str {
        "key/value pairs"
    }

    fn import(&self, reader: &mut dyn BufRead, node: &mut Node, cancel: &CancelToken) -> Result<()> {
        cancel.check()?;
        tracing::debug!("importing key/value pairs");
        for line in reader.lines() {
            cancel.check()?;
            let line = line?;
            let (key, value) = match line.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (line.as_str(), None),
            };
            let path = PropertyPath::from_segments(key.split(self.options.separator.as_str()))?;
            match value {
                Some(text) => node.write_at(&path, text)?,
                None => node.write_at(&path, NodeValue::Null)?,
            };
        }
        Ok(())
    }

    fn export(&self, writer: &mut dyn Write, node: &Node, cancel: &CancelToken) -> Result<()> {
        cancel.check()?;
        tracing::debug!("exporting key/value pairs");
        let options = &self.options;
        let mut visit = |path: &[String], value: &NodeValue| -> Result<()> {
            cancel.check()?;
            let key = path
                .iter()
                .map(|segment| options.format.convert_name(segment))
                .collect::<Vec<_>>()
                .join(&options.separator);
            let text = value.scalar_text().unwrap_or_default();
            let line = options
                .line_format
                .replacen("{key}", &key, 1)
                .replacen("{value}", &text, 1);
            writer.write_all(line.as_bytes())?;
            writer.write_all(options.line_terminator.as_bytes())?;
            Ok(())
        };
        node.traverse(None, Some(&mut visit), true)
    }
}
