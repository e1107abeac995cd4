//! YAML codec (import only).
//!
//! Walks a parsed YAML mapping into the tree: mappings become nested
//! nodes, sequences become nodes keyed `"0"`, `"1"`, …, scalars become
//! typed values. A string scalar spelling `true`/`false` (any casing) is
//! coerced to boolean; a quoted `"true"` therefore cannot be told apart
//! from a bare boolean, and the ambiguity is kept as-is.

use std::io::BufRead;

use serde_yaml::Value;

use crate::error::{ModelError, Result};
use crate::format::{CancelToken, Format, FormatOptions};
use crate::node::Node;
use crate::value::NodeValue;

/// Options for [`YamlFormat`]. YAML has no switches beyond the shared
/// ones.
#[derive(Debug, Clone, Default)]
pub struct YamlFormatOptions {
    pub format: FormatOptions,
}

/// Imports YAML mapping documents. Export is not supported.
#[derive(Debug, Clone, Default)]
pub struct YamlFormat {
    options: YamlFormatOptions,
}

impl YamlFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: YamlFormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &YamlFormatOptions {
        &self.options
    }
}

impl Format for YamlFormat {
    fn name(&self) -> &'static str {
        "YAML"
    }

    fn import(&self, reader: &mut dyn BufRead, node: &mut Node, cancel: &CancelToken) -> Result<()> {
        cancel.check()?;
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        tracing::debug!(bytes = text.len(), "importing YAML document");
        match serde_yaml::from_str(&text)? {
            Value::Null => Ok(()),
            Value::Mapping(mapping) => import_mapping(&mapping, node, cancel),
            _ => Err(ModelError::Malformed(
                "the root of a YAML document must be a mapping".to_string(),
            )),
        }
    }
}

fn import_mapping(
    mapping: &serde_yaml::Mapping,
    node: &mut Node,
    cancel: &CancelToken,
) -> Result<()> {
    for (key, value) in mapping {
        cancel.check()?;
        let Value::String(key) = key else {
            return Err(ModelError::Malformed(
                "YAML mapping keys must be strings".to_string(),
            ));
        };
        import_entry(node, key, value, cancel)?;
    }
    Ok(())
}

fn import_entry(node: &mut Node, key: &str, value: &Value, cancel: &CancelToken) -> Result<()> {
    match value {
        Value::Mapping(mapping) => {
            let child = child_node_slot(node, key)?;
            import_mapping(mapping, child, cancel)
        }
        Value::Sequence(items) => {
            let child = child_node_slot(node, key)?;
            for (index, item) in items.iter().enumerate() {
                cancel.check()?;
                import_entry(child, &index.to_string(), item, cancel)?;
            }
            Ok(())
        }
        Value::Tagged(tagged) => import_entry(node, key, &tagged.value, cancel),
        scalar => {
            node.insert(key.to_string(), scalar_value(scalar));
            Ok(())
        }
    }
}

/// Reuses the existing child node at `key`, or inserts a fresh one. A key
/// already holding a scalar cannot be re-targeted as a mapping or
/// sequence.
fn child_node_slot<'a>(node: &'a mut Node, key: &str) -> Result<&'a mut Node> {
    match node.get(key) {
        Some(value) if !value.is_node() => {
            return Err(ModelError::PathConflict {
                path: key.to_string(),
            })
        }
        None => {
            node.insert(key.to_string(), Node::new());
        }
        Some(_) => {}
    }
    match node.get_mut(key) {
        Some(NodeValue::Node(child)) => Ok(child),
        _ => unreachable!("slot was just ensured to hold a node"),
    }
}

fn scalar_value(value: &Value) -> NodeValue {
    match value {
        Value::Null => NodeValue::Null,
        Value::Bool(b) => NodeValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                NodeValue::I64(i)
            } else if let Some(u) = n.as_u64() {
                NodeValue::U64(u)
            } else {
                NodeValue::F64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => {
            if s.eq_ignore_ascii_case("true") {
                NodeValue::Bool(true)
            } else if s.eq_ignore_ascii_case("false") {
                NodeValue::Bool(false)
            } else {
                NodeValue::String(s.clone())
            }
        }
        // Mappings, sequences and tags are dispatched before this point.
        _ => NodeValue::Null,
    }
}
