//! The tree container: an ordered, case-insensitive keyed mapping.

use crate::error::{ModelError, Result};
use crate::path::PropertyPath;
use crate::value::{FromNodeValue, NodeValue};

/// A node in the structured data model: an insertion-ordered mapping from
/// string keys to [`NodeValue`]s.
///
/// Keys are compared case-insensitively (ASCII) but stored with their
/// original casing, and must be unique under that comparison. Nodes have no
/// parent references; every node is exclusively owned by one parent slot or
/// is a tree root, so trees have no cycles and no aliasing.
///
/// Values are usually addressed through dotted property paths rather than
/// key by key:
///
/// ```rust
/// use nodeform_core::Node;
///
/// # fn main() -> nodeform_core::Result<()> {
/// let mut model = Node::new();
/// model.write("log.level", "info")?;
/// assert_eq!(model.read("log.level", String::new())?, "info");
/// # Ok(())
/// # }
/// ```
///
/// Children are stored as an insertion-ordered `Vec` with linear lookup;
/// trees here are configuration-shaped and small, and this keeps key order
/// without an ordered-map dependency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    entries: Vec<(String, NodeValue)>,
}

impl Node {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&NodeValue> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut NodeValue> {
        self.position(key).map(|idx| &mut self.entries[idx].1)
    }

    /// Inserts or replaces the value at `key`, returning the previous value
    /// if there was one. A replaced entry keeps its originally stored key
    /// casing and position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<NodeValue>) -> Option<NodeValue> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes the entry at `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<NodeValue> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    /// Keys in insertion order, with their original casing.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NodeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Adds an empty child node under `key` and returns a reference for the
    /// caller to populate. The parent owns the child; the returned borrow is
    /// only a handle into it.
    pub fn add_node(&mut self, key: impl Into<String>) -> Result<&mut Node> {
        let key = self.validate_new_key(key.into())?;
        self.entries.push((key, NodeValue::Node(Node::new())));
        match self.entries.last_mut() {
            Some((_, NodeValue::Node(node))) => Ok(node),
            _ => unreachable!("entry was just inserted"),
        }
    }

    /// Adds a scalar value under `key`. Fails with `InvalidKey` if the key
    /// is empty, whitespace-only or already present, and with
    /// `InvalidScalarType` if the value is not one of the scalar kinds.
    pub fn add_value(&mut self, key: impl Into<String>, value: impl Into<NodeValue>) -> Result<&mut Self> {
        let key = self.validate_new_key(key.into())?;
        let value = value.into();
        if value.is_node() {
            return Err(ModelError::InvalidScalarType(
                "a nested node is not a scalar value".to_string(),
            ));
        }
        self.entries.push((key, value));
        Ok(self)
    }

    /// Adds a homogeneous sequence of scalars under `key` as a child node
    /// keyed `"0"`, `"1"`, … in iteration order. Every element must be a
    /// scalar; nothing is inserted if validation fails.
    pub fn add_values<I, T>(&mut self, key: impl Into<String>, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeValue>,
    {
        let key = self.validate_new_key(key.into())?;
        let mut sequence = Node::new();
        for (index, value) in values.into_iter().enumerate() {
            let value = value.into();
            if value.is_node() {
                return Err(ModelError::InvalidScalarType(format!(
                    "sequence element {index} is not a scalar value"
                )));
            }
            sequence.entries.push((index.to_string(), value));
        }
        self.entries.push((key, NodeValue::Node(sequence)));
        Ok(self)
    }

    /// Reads the value at `key` (a single key, not a path), converted to
    /// `T`. Returns `default` when the key is absent; an existing value of
    /// a different kind is a `TypeMismatch`.
    pub fn get_value<T: FromNodeValue>(&self, key: &str, default: T) -> Result<T> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => T::from_node_value(value).ok_or_else(|| ModelError::TypeMismatch {
                expected: T::KIND,
                actual: value.kind_name(),
            }),
        }
    }

    /// Reads the value at a dotted path, converted to `T`.
    ///
    /// The walk is read-only: a missing intermediate node (or missing
    /// terminal key) yields `default` and never creates anything. A scalar
    /// found where the path needs a node is a `PathConflict`; a stored
    /// value of a different kind than `T` is a `TypeMismatch`.
    pub fn read<T: FromNodeValue>(&self, path: &str, default: T) -> Result<T> {
        self.read_at(&PropertyPath::parse(path)?, default)
    }

    /// [`read`](Self::read) with a pre-parsed path.
    pub fn read_at<T: FromNodeValue>(&self, path: &PropertyPath, default: T) -> Result<T> {
        let Some(parent) = self.descend(path.parents())? else {
            return Ok(default);
        };
        parent.get_value(path.last(), default)
    }

    /// Writes a value at a dotted path, creating missing intermediate nodes
    /// and overwriting any existing terminal value wholesale.
    ///
    /// The path is validated before anything is touched. An intermediate
    /// segment that already holds a scalar is a `PathConflict`; nodes
    /// created for earlier, non-conflicting segments are kept.
    pub fn write<T: Into<NodeValue>>(&mut self, path: &str, value: T) -> Result<&mut Self> {
        self.write_at(&PropertyPath::parse(path)?, value)
    }

    /// [`write`](Self::write) with a pre-parsed path.
    pub fn write_at<T: Into<NodeValue>>(&mut self, path: &PropertyPath, value: T) -> Result<&mut Self> {
        let value = value.into();
        let parent = self.descend_or_create(path.parents())?;
        parent.insert(path.last().to_string(), value);
        Ok(self)
    }

    /// Resolves the node at `path` without creating anything. `Ok(None)`
    /// when any segment is missing; a scalar anywhere on the path, the
    /// terminal segment included, is a `PathConflict`.
    pub fn read_node(&self, path: &str) -> Result<Option<&Node>> {
        let path = PropertyPath::parse(path)?;
        self.descend(path.segments())
    }

    /// Resolves the node at `path`, creating missing nodes along the way,
    /// the terminal segment included. The conflict rule of
    /// [`write`](Self::write) applies to every segment.
    pub fn write_node(&mut self, path: &str) -> Result<&mut Node> {
        let path = PropertyPath::parse(path)?;
        self.descend_or_create(path.segments())
    }

    /// Derives a sequence view over the children when the keys form the
    /// contiguous run `"0"`, `"1"`, … `"len-1"`.
    ///
    /// The scan is fail-fast by contract: an empty node or a node without a
    /// `"0"` key is not an array, and probing stops at the first missing
    /// index. A node with extra non-sequential keys beyond a contiguous run
    /// is judged by probe outcome only, not by full key-set analysis.
    pub fn try_as_array(&self) -> Option<Vec<&NodeValue>> {
        if self.is_empty() {
            return None;
        }
        let first = self.get("0")?;
        let mut array = Vec::with_capacity(self.len());
        array.push(first);
        for index in 1..self.len() {
            array.push(self.get(&index.to_string())?);
        }
        Some(array)
    }

    fn validate_new_key(&self, key: String) -> Result<String> {
        if key.trim().is_empty() {
            return Err(ModelError::InvalidKey(
                "node key cannot be empty or whitespace".to_string(),
            ));
        }
        if self.contains_key(&key) {
            return Err(ModelError::InvalidKey(format!("key '{key}' already exists")));
        }
        Ok(key)
    }

    /// Walks `segments` read-only. Returns `None` as soon as a segment is
    /// absent; a segment holding a scalar is a conflict, reported with the
    /// dotted prefix accumulated so far.
    fn descend(&self, segments: &[String]) -> Result<Option<&Node>> {
        let mut current = self;
        let mut prefix = String::new();
        for segment in segments {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(segment);
            current = match current.get(segment) {
                None => return Ok(None),
                Some(NodeValue::Node(node)) => node,
                Some(_) => return Err(ModelError::PathConflict { path: prefix }),
            };
        }
        Ok(Some(current))
    }

    /// Walks `segments`, inserting an empty node wherever a segment is
    /// missing. A segment holding a scalar is a conflict, reported with the
    /// dotted prefix accumulated so far.
    fn descend_or_create(&mut self, segments: &[String]) -> Result<&mut Node> {
        let mut current = self;
        let mut prefix = String::new();
        for segment in segments {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(segment);
            if !current.contains_key(segment) {
                current
                    .entries
                    .push((segment.clone(), NodeValue::Node(Node::new())));
            }
            current = match current.get_mut(segment) {
                Some(NodeValue::Node(node)) => node,
                _ => return Err(ModelError::PathConflict { path: prefix }),
            };
        }
        Ok(current)
    }
}
