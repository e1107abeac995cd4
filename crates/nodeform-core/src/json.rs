//! JSON codec.
//!
//! Export walks the node's own iteration rather than the shared traversal,
//! since object braces must open and close exactly at node boundaries.
//! Import parses the whole document (member order preserved) and rebuilds
//! the structure: objects become nodes, arrays become index-keyed nodes,
//! scalars become typed values.

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::format::{CancelToken, Format, FormatOptions};
use crate::node::Node;
use crate::value::NodeValue;

/// Options for [`JsonFormat`]. JSON has no switches beyond the shared ones.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatOptions {
    pub format: FormatOptions,
}

/// Imports and exports JSON object documents. The root is always a JSON
/// object.
#[derive(Debug, Clone, Default)]
pub struct JsonFormat {
    options: JsonFormatOptions,
}

impl JsonFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: JsonFormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &JsonFormatOptions {
        &self.options
    }
}

impl Format for JsonFormat {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn import(&self, reader: &mut dyn BufRead, node: &mut Node, cancel: &CancelToken) -> Result<()> {
        cancel.check()?;
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        tracing::debug!(bytes = text.len(), "importing JSON document");
        let value: Value = serde_json::from_str(&text)?;
        let Value::Object(members) = value else {
            return Err(ModelError::Malformed(
                "the root of a JSON document must be an object".to_string(),
            ));
        };
        import_object(&members, node, cancel)
    }

    fn export(&self, writer: &mut dyn Write, node: &Node, cancel: &CancelToken) -> Result<()> {
        cancel.check()?;
        tracing::debug!("exporting JSON document");
        let mut out = String::new();
        out.push('{');
        export_node(node, 1, &mut out, &self.options.format, cancel)?;
        if !node.is_empty() {
            out.push('\n');
        }
        out.push('}');
        writer.write_all(out.as_bytes())?;
        Ok(())
    }
}

/// Emit the members of a node at the given indentation depth, one per
/// line, comma-separated.
fn export_node(
    node: &Node,
    depth: usize,
    out: &mut String,
    options: &FormatOptions,
    cancel: &CancelToken,
) -> Result<()> {
    let indent = make_indent(depth);
    let mut first = true;
    for (key, value) in node.iter() {
        cancel.check()?;
        if !first {
            out.push(',');
        }
        first = false;
        out.push('\n');
        out.push_str(&indent);
        encode_string(&options.convert_name(key), out);
        out.push_str(": ");
        export_value(value, depth, out, options, cancel)?;
    }
    Ok(())
}

/// Dispatch one stored value to the matching JSON form. Nested nodes
/// become nested objects; a char is written as a one-character string;
/// non-finite floats degrade to `null`.
fn export_value(
    value: &NodeValue,
    depth: usize,
    out: &mut String,
    options: &FormatOptions,
    cancel: &CancelToken,
) -> Result<()> {
    match value {
        NodeValue::Node(child) => {
            out.push('{');
            export_node(child, depth + 1, out, options, cancel)?;
            if !child.is_empty() {
                out.push('\n');
                out.push_str(&make_indent(depth));
            }
            out.push('}');
        }
        NodeValue::Null => out.push_str("null"),
        NodeValue::String(s) => encode_string(s, out),
        NodeValue::Char(c) => encode_string(&c.to_string(), out),
        NodeValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        NodeValue::I8(n) => out.push_str(&n.to_string()),
        NodeValue::U8(n) => out.push_str(&n.to_string()),
        NodeValue::I16(n) => out.push_str(&n.to_string()),
        NodeValue::U16(n) => out.push_str(&n.to_string()),
        NodeValue::I32(n) => out.push_str(&n.to_string()),
        NodeValue::U32(n) => out.push_str(&n.to_string()),
        NodeValue::I64(n) => out.push_str(&n.to_string()),
        NodeValue::U64(n) => out.push_str(&n.to_string()),
        NodeValue::F32(f) => encode_float(f64::from(*f), out),
        NodeValue::F64(f) => encode_float(*f, out),
        NodeValue::Decimal(d) => out.push_str(&d.to_string()),
    }
    Ok(())
}

/// JSON has no NaN or infinity; both degrade to `null`.
fn encode_float(f: f64, out: &mut String) {
    if f.is_nan() || f.is_infinite() {
        out.push_str("null");
    } else {
        out.push_str(&f.to_string());
    }
}

fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn make_indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// Add every member of a JSON object to `node`, overwriting existing keys
/// wholesale.
fn import_object(
    members: &serde_json::Map<String, Value>,
    node: &mut Node,
    cancel: &CancelToken,
) -> Result<()> {
    for (key, value) in members {
        cancel.check()?;
        let value = import_value(value, cancel)?;
        node.insert(key.clone(), value);
    }
    Ok(())
}

fn import_value(value: &Value, cancel: &CancelToken) -> Result<NodeValue> {
    Ok(match value {
        Value::Null => NodeValue::Null,
        Value::Bool(b) => NodeValue::Bool(*b),
        Value::Number(n) => import_number(n),
        Value::String(s) => NodeValue::String(s.clone()),
        Value::Array(items) => {
            let mut child = Node::new();
            for (index, item) in items.iter().enumerate() {
                cancel.check()?;
                let item = import_value(item, cancel)?;
                child.insert(index.to_string(), item);
            }
            NodeValue::Node(child)
        }
        Value::Object(members) => {
            let mut child = Node::new();
            import_object(members, &mut child, cancel)?;
            NodeValue::Node(child)
        }
    })
}

/// First exact fit wins: i64, then u64, then f64.
fn import_number(n: &serde_json::Number) -> NodeValue {
    if let Some(i) = n.as_i64() {
        return NodeValue::I64(i);
    }
    if let Some(u) = n.as_u64() {
        return NodeValue::U64(u);
    }
    NodeValue::F64(n.as_f64().unwrap_or(f64::NAN))
}
