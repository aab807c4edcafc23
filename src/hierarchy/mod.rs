//! Per-event trigger hierarchies.
//!
//! The trigger-decision engine records, for each processed event, a forest of
//! trigger firings: merged global triggers at the roots with the triggers they
//! fold in as children. The forest is stored as an arena of nodes with child
//! index lists and is immutable once handed to the query functions.

pub mod query;

pub use query::{count_triggers, find_matching, find_triggers, trigger_lengths, TriggerFilter};

use crate::error::HierarchyError;
use crate::trigger::TriggerKey;

/// One trigger firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerRecord {
    /// Trigger that fired.
    pub key: TriggerKey,
    /// Start of the triggered interval, in ns.
    pub start: f64,
    /// Length of the triggered interval, in ns.
    pub length: f64,
}

impl TriggerRecord {
    /// Creates a record covering `[start, start + length)`.
    #[must_use]
    pub const fn new(key: TriggerKey, start: f64, length: f64) -> Self {
        Self { key, start, length }
    }

    /// End of the interval (exclusive).
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.length
    }

    /// Interval length computed from its bounds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end() - self.start
    }
}

/// Handle to a node in a [`TriggerHierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of the node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Node {
    record: TriggerRecord,
    children: Vec<NodeId>,
}

/// A rooted forest of trigger records.
#[derive(Debug, Clone, Default)]
pub struct TriggerHierarchy {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl TriggerHierarchy {
    /// Create an empty hierarchy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, record: TriggerRecord) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            record,
            children: Vec::new(),
        });
        id
    }

    /// Add a top-level record.
    pub fn insert_root(&mut self, record: TriggerRecord) -> NodeId {
        let id = self.push(record);
        self.roots.push(id);
        id
    }

    /// Add `record` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns `HierarchyError::UnknownParent` if `parent` does not belong to
    /// this hierarchy.
    pub fn insert_child(&mut self, parent: NodeId, record: TriggerRecord) -> Result<NodeId, HierarchyError> {
        if parent.0 >= self.nodes.len() {
            return Err(HierarchyError::UnknownParent { index: parent.0 });
        }
        let id = self.push(record);
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Record stored at `node`.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&TriggerRecord> {
        self.nodes.get(node.0).map(|n| &n.record)
    }

    /// Children of `node` in insertion order (empty for unknown nodes).
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node.0).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// Top-level nodes in insertion order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Total number of records at any depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All records in preorder: parents before children, siblings in
    /// insertion order.
    #[must_use]
    pub fn iter(&self) -> Preorder<'_> {
        Preorder {
            hierarchy: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TriggerHierarchy {
    type Item = &'a TriggerRecord;
    type IntoIter = Preorder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Preorder traversal over a [`TriggerHierarchy`].
///
/// A clone continues independently from the same position; call
/// [`TriggerHierarchy::iter`] again for a fresh pass.
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    hierarchy: &'a TriggerHierarchy,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a TriggerRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.hierarchy.nodes[id.0];
        self.stack.extend(node.children.iter().rev().copied());
        Some(&node.record)
    }
}
