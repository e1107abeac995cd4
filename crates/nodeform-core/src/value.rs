//! Typed values stored in a node tree.
//!
//! [`NodeValue`] is a closed tagged union: null, a nested [`Node`], or one
//! scalar of a fixed set of primitive kinds. The supported kinds are
//! exactly the enum's variants; anything else is unrepresentable, so
//! validation of generic inputs happens at the conversion boundary
//! ([`From`] impls going in, [`FromNodeValue`] coming out).

use rust_decimal::Decimal;

use crate::node::Node;

/// The tagged value stored at a node key: null, a nested node (the value
/// *is* a subtree), or one scalar of a fixed primitive kind.
///
/// A value's kind is fixed at construction. Changing the kind at a key
/// means replacing the whole slot in the parent node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    Null,
    /// A nested node, exclusively owned by this slot.
    Node(Node),
    String(String),
    Char(char),
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    /// Exact decimal value.
    Decimal(Decimal),
}

impl NodeValue {
    pub fn is_node(&self) -> bool {
        matches!(self, NodeValue::Node(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NodeValue::Null)
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            NodeValue::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            NodeValue::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Stable kind label, used in type-mismatch messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeValue::Null => "null",
            NodeValue::Node(_) => "node",
            NodeValue::String(_) => "string",
            NodeValue::Char(_) => "char",
            NodeValue::Bool(_) => "bool",
            NodeValue::I8(_) => "i8",
            NodeValue::U8(_) => "u8",
            NodeValue::I16(_) => "i16",
            NodeValue::U16(_) => "u16",
            NodeValue::I32(_) => "i32",
            NodeValue::U32(_) => "u32",
            NodeValue::I64(_) => "i64",
            NodeValue::U64(_) => "u64",
            NodeValue::F32(_) => "f32",
            NodeValue::F64(_) => "f64",
            NodeValue::Decimal(_) => "decimal",
        }
    }

    /// Canonical text rendering of a scalar, used by the XML and key/value
    /// exporters. `Null` renders as the empty string; nested nodes have no
    /// text form.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            NodeValue::Node(_) => None,
            NodeValue::Null => Some(String::new()),
            NodeValue::String(s) => Some(s.clone()),
            NodeValue::Char(c) => Some(c.to_string()),
            NodeValue::Bool(b) => Some(b.to_string()),
            NodeValue::I8(n) => Some(n.to_string()),
            NodeValue::U8(n) => Some(n.to_string()),
            NodeValue::I16(n) => Some(n.to_string()),
            NodeValue::U16(n) => Some(n.to_string()),
            NodeValue::I32(n) => Some(n.to_string()),
            NodeValue::U32(n) => Some(n.to_string()),
            NodeValue::I64(n) => Some(n.to_string()),
            NodeValue::U64(n) => Some(n.to_string()),
            NodeValue::F32(f) => Some(f.to_string()),
            NodeValue::F64(f) => Some(f.to_string()),
            NodeValue::Decimal(d) => Some(d.to_string()),
        }
    }
}

/// Conversion out of a stored [`NodeValue`] into a concrete type.
///
/// Conversions are exact, never coercing: a stored `I32` can only be read
/// back as `i32`. `Option<T>` additionally accepts `Null` as `None`.
pub trait FromNodeValue: Sized {
    /// Kind label reported in type-mismatch messages.
    const KIND: &'static str;

    fn from_node_value(value: &NodeValue) -> Option<Self>;
}

macro_rules! scalar_conversions {
    ($($variant:ident => $ty:ty, $name:literal;)*) => {
        $(
            impl From<$ty> for NodeValue {
                fn from(value: $ty) -> Self {
                    NodeValue::$variant(value)
                }
            }

            impl FromNodeValue for $ty {
                const KIND: &'static str = $name;

                fn from_node_value(value: &NodeValue) -> Option<Self> {
                    match value {
                        NodeValue::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

scalar_conversions! {
    String => String, "string";
    Char => char, "char";
    Bool => bool, "bool";
    I8 => i8, "i8";
    U8 => u8, "u8";
    I16 => i16, "i16";
    U16 => u16, "u16";
    I32 => i32, "i32";
    U32 => u32, "u32";
    I64 => i64, "i64";
    U64 => u64, "u64";
    F32 => f32, "f32";
    F64 => f64, "f64";
    Decimal => Decimal, "decimal";
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        NodeValue::String(value.to_string())
    }
}

impl From<Node> for NodeValue {
    fn from(value: Node) -> Self {
        NodeValue::Node(value)
    }
}

impl<T: Into<NodeValue>> From<Option<T>> for NodeValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => NodeValue::Null,
        }
    }
}

impl<T: FromNodeValue> FromNodeValue for Option<T> {
    const KIND: &'static str = T::KIND;

    fn from_node_value(value: &NodeValue) -> Option<Self> {
        match value {
            NodeValue::Null => Some(None),
            other => T::from_node_value(other).map(Some),
        }
    }
}
