//! Depth-first traversal over a node tree.
//!
//! The walk visits direct children in insertion order. Node visitors run
//! before descending into a child node and observe the path of its
//! *ancestors*; value visitors observe the full path including the leaf
//! key. Collecting every value event yields the flattened `(path, value)`
//! view of a tree ([`Node::flattened`]).

use crate::error::Result;
use crate::node::Node;
use crate::value::NodeValue;

/// Visitor invoked when a recursive traversal is about to descend into a
/// child node. The slice holds the keys of the node's ancestors; the
/// child's own key is pushed after the call.
pub type NodeVisitor<'a> = &'a mut dyn FnMut(&[String]) -> Result<()>;

/// Visitor invoked for every value entry. The slice holds the full key
/// path, leaf key included. Returning an error aborts the walk.
pub type ValueVisitor<'a> = &'a mut dyn FnMut(&[String], &NodeValue) -> Result<()>;

/// One leaf of a flattened tree: the full key path and the value stored
/// there.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedNode {
    pub key_path: Vec<String>,
    pub value: NodeValue,
}

impl FlattenedNode {
    /// Joins the key path with `separator` into a single property name.
    pub fn key_path_string(&self, separator: &str) -> String {
        self.key_path.join(separator)
    }
}

impl Node {
    /// Walks the tree depth-first in insertion order, invoking the given
    /// visitors along an accumulated key stack.
    ///
    /// For an entry holding a child node (with `recursive` set), the node
    /// visitor runs, the key is pushed, the child is walked, and the key is
    /// popped. Any other entry pushes its key, runs the value visitor and
    /// pops. With `recursive` off, child nodes are reported to the value
    /// visitor as opaque values instead of being descended into.
    ///
    /// A visitor error aborts the walk and propagates to the caller; this
    /// is how codecs surface I/O failures and cancellation from inside a
    /// walk. Visitors run strictly in traversal order.
    pub fn traverse(
        &self,
        mut node_visitor: Option<NodeVisitor<'_>>,
        mut value_visitor: Option<ValueVisitor<'_>>,
        recursive: bool,
    ) -> Result<()> {
        let mut path = Vec::new();
        self.traverse_recursive(&mut path, &mut node_visitor, &mut value_visitor, recursive)
    }

    fn traverse_recursive(
        &self,
        path: &mut Vec<String>,
        node_visitor: &mut Option<NodeVisitor<'_>>,
        value_visitor: &mut Option<ValueVisitor<'_>>,
        recursive: bool,
    ) -> Result<()> {
        for (key, value) in self.iter() {
            match value {
                NodeValue::Node(child) if recursive => {
                    if let Some(visit) = node_visitor.as_mut() {
                        visit(path)?;
                    }
                    path.push(key.to_string());
                    let result =
                        child.traverse_recursive(path, node_visitor, value_visitor, recursive);
                    path.pop();
                    result?;
                }
                _ => {
                    path.push(key.to_string());
                    let result = match value_visitor.as_mut() {
                        Some(visit) => visit(path, value),
                        None => Ok(()),
                    };
                    path.pop();
                    result?;
                }
            }
        }
        Ok(())
    }

    /// Collects every value entry visited by [`traverse`](Self::traverse)
    /// into a flattened `(path, value)` list.
    pub fn flattened(&self, recursive: bool) -> Result<Vec<FlattenedNode>> {
        let mut leaves = Vec::new();
        self.traverse(
            None,
            Some(&mut |path: &[String], value: &NodeValue| {
                leaves.push(FlattenedNode {
                    key_path: path.to_vec(),
                    value: value.clone(),
                });
                Ok(())
            }),
            recursive,
        )?;
        Ok(leaves)
    }
}
