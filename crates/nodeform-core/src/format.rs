//! The codec contract shared by every format, plus the options and
//! cancellation primitives the codecs consume.

use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{ModelError, Result};
use crate::node::Node;

/// Rewrites a property name during export. Stock converters live in
/// [`crate::convert`]; any `fn(&str) -> String` works.
pub type NameConverter = fn(&str) -> String;

/// Configuration shared by all codecs. Format-specific option structs embed
/// this and add their own switches.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Applied to every property name on export. Identity when absent.
    pub property_name_converter: Option<NameConverter>,
}

impl FormatOptions {
    pub fn with_name_converter(converter: NameConverter) -> Self {
        Self {
            property_name_converter: Some(converter),
        }
    }

    /// Applies the configured converter, or returns the name unchanged.
    pub fn convert_name(&self, name: &str) -> String {
        match self.property_name_converter {
            Some(convert) => convert(name),
            None => name.to_string(),
        }
    }
}

/// Cooperative cancellation flag shared between a caller and a running
/// import or export.
///
/// Codecs check the token once per input line/token/element and abort with
/// [`ModelError::Cancelled`], leaving the target node partially populated
/// but structurally valid. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Every clone of the token observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Errs with [`ModelError::Cancelled`] once the token is cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ModelError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Imports external text into a [`Node`] tree and exports a tree back to
/// text.
///
/// The streaming forms are primary; the string forms are convenience
/// wrappers that buffer internally. A codec that only supports one
/// direction leaves the other at its default body, which fails with
/// [`ModelError::Unsupported`].
pub trait Format {
    /// Short format name used in diagnostics and `Unsupported` errors.
    fn name(&self) -> &'static str;

    /// Reads the contents of `reader` into `node`.
    fn import(&self, reader: &mut dyn BufRead, node: &mut Node, cancel: &CancelToken) -> Result<()> {
        let _ = (reader, node, cancel);
        Err(ModelError::Unsupported {
            format: self.name(),
            operation: "import",
        })
    }

    /// Writes the contents of `node` to `writer`.
    fn export(&self, writer: &mut dyn Write, node: &Node, cancel: &CancelToken) -> Result<()> {
        let _ = (writer, node, cancel);
        Err(ModelError::Unsupported {
            format: self.name(),
            operation: "export",
        })
    }

    /// Imports a string into a fresh tree.
    fn import_str(&self, text: &str) -> Result<Node> {
        let mut node = Node::new();
        self.import_str_into(text, &mut node)?;
        Ok(node)
    }

    /// Imports a string into an existing tree.
    fn import_str_into(&self, text: &str, node: &mut Node) -> Result<()> {
        let mut reader = text.as_bytes();
        self.import(&mut reader, node, &CancelToken::new())
    }

    /// Exports a tree to a string.
    fn export_string(&self, node: &Node) -> Result<String> {
        let mut buffer = Vec::new();
        self.export(&mut buffer, node, &CancelToken::new())?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
