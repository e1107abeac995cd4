//! # nodeform-core
//!
//! A generic, hierarchical, dynamically-typed data container (a "node
//! tree") used as a neutral intermediate representation for structured
//! configuration data, together with codecs that import JSON, XML, YAML
//! and line-oriented `key=value` text into the tree and export it back
//! out. Consumers read and write values through dotted property paths
//! rather than manipulating the tree directly.
//!
//! ## Quick start
//!
//! ```rust
//! use nodeform_core::{Format, JsonFormat, Node};
//!
//! # fn main() -> nodeform_core::Result<()> {
//! let mut model = Node::new();
//! model
//!     .write("log.level", "info")?
//!     .write("log.write_to_file", true)?;
//!
//! let json = JsonFormat::new().export_string(&model)?;
//! let back = JsonFormat::new().import_str(&json)?;
//! assert_eq!(back.read("log.level", String::new())?, "info");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`node`] — the tree container with path-based read/write and array
//!   inference
//! - [`value`] — the tagged value type and its conversion boundary
//! - [`path`] — dotted property paths and their segment grammar
//! - [`traverse`] — depth-first visitor walk and the flattened view
//! - [`format`] — the codec contract, shared options and cancellation
//! - [`convert`] — stock property-name converters
//! - [`json`], [`xml`], [`yaml`], [`kvp`] — the concrete codecs
//! - [`error`] — error types

pub mod convert;
pub mod error;
pub mod format;
pub mod json;
pub mod kvp;
pub mod node;
pub mod path;
pub mod traverse;
pub mod value;
pub mod xml;
pub mod yaml;

pub use error::{ModelError, Result};
pub use format::{CancelToken, Format, FormatOptions, NameConverter};
pub use json::{JsonFormat, JsonFormatOptions};
pub use kvp::{KeyValuePairsFormat, KeyValuePairsFormatOptions};
pub use node::Node;
pub use path::PropertyPath;
pub use traverse::FlattenedNode;
pub use value::{FromNodeValue, NodeValue};
pub use xml::{XmlFormat, XmlFormatOptions};
pub use yaml::{YamlFormat, YamlFormatOptions};
