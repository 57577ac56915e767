//! Trie building blocks: nodes, leaves and labeled edges.

use std::fmt;
use std::sync::Arc;

use crate::watch::Watch;

/// Terminal key/value holder.
///
/// The key is the complete key, not the local prefix, so lookups can
/// compare it directly.
pub struct Leaf<V> {
    pub(crate) key: Vec<u8>,
    pub(crate) value: Option<V>,
    pub(crate) watch: Watch,
}

impl<V> Leaf<V> {
    pub fn new(key: impl Into<Vec<u8>>, value: Option<V>) -> Self {
        Self {
            key: key.into(),
            value,
            watch: Watch::new(),
        }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The stored value, `None` when it is logically absent.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Signaled when this leaf is replaced by an update of its key.
    pub fn watch(&self) -> &Watch {
        &self.watch
    }
}

impl<V: PartialEq> PartialEq for Leaf<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl<V: fmt::Debug> fmt::Debug for Leaf<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("key", &String::from_utf8_lossy(&self.key))
            .field("value", &self.value)
            .finish()
    }
}

/// A single-byte transition to an optional child node.
pub struct Edge<V> {
    pub(crate) label: u8,
    pub(crate) node: Option<Arc<Node<V>>>,
}

impl<V> Edge<V> {
    pub fn new(label: u8, node: Option<Arc<Node<V>>>) -> Self {
        Self { label, node }
    }

    pub fn label(&self) -> u8 {
        self.label
    }

    pub fn node(&self) -> Option<&Arc<Node<V>>> {
        self.node.as_ref()
    }
}

impl<V> Clone for Edge<V> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            node: self.node.clone(),
        }
    }
}

impl<V: PartialEq> PartialEq for Edge<V> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.node == other.node
    }
}

impl<V: fmt::Debug> fmt::Debug for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Edge")
            .field("label", &(self.label as char))
            .field("node", &self.node)
            .finish()
    }
}

/// An internal trie node.
///
/// A node holds the bytes consumed on the way from its parent (`prefix`,
/// empty only at the root), an optional leaf for the key ending exactly
/// here, and its outgoing edges sorted ascending by label.
pub struct Node<V> {
    pub(crate) leaf: Option<Arc<Leaf<V>>>,
    pub(crate) prefix: Vec<u8>,
    pub(crate) edges: Vec<Edge<V>>,
    pub(crate) watch: Watch,
}

impl<V> Node<V> {
    /// Builds a node from its parts as given.
    ///
    /// Edge order is taken as is; nothing here sorts or validates it.
    pub fn new(
        leaf: Option<Arc<Leaf<V>>>,
        prefix: impl Into<Vec<u8>>,
        edges: Vec<Edge<V>>,
    ) -> Self {
        Self {
            leaf,
            prefix: prefix.into(),
            edges,
            watch: Watch::new(),
        }
    }

    pub fn leaf(&self) -> Option<&Arc<Leaf<V>>> {
        self.leaf.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn edges(&self) -> &[Edge<V>] {
        &self.edges
    }

    /// Signaled when this node is path-copied by an insert.
    pub fn watch(&self) -> &Watch {
        &self.watch
    }

    /// Finds the child reached through `label` by binary search.
    pub fn edge(&self, label: u8) -> Option<&Arc<Node<V>>> {
        self.edge_index(label)
            .ok()
            .and_then(|idx| self.edges[idx].node.as_ref())
    }

    pub(crate) fn edge_index(&self, label: u8) -> Result<usize, usize> {
        self.edges.binary_search_by_key(&label, |edge| edge.label)
    }

    /// Shallow copy for path copying: shares the leaf and children, gets a
    /// fresh watch.
    pub(crate) fn copy(&self) -> Self {
        Self {
            leaf: self.leaf.clone(),
            prefix: self.prefix.clone(),
            edges: self.edges.clone(),
            watch: Watch::new(),
        }
    }

    pub(crate) fn add_edge(&mut self, edge: Edge<V>) {
        match self.edge_index(edge.label) {
            Ok(idx) => self.edges[idx] = edge,
            Err(idx) => self.edges.insert(idx, edge),
        }
    }
}

impl<V> Drop for Node<V> {
    // Unlinks uniquely owned descendants onto a heap stack so that dropping
    // a deep chain does not recurse once per level.
    fn drop(&mut self) {
        let mut pending: Vec<Arc<Node<V>>> = self
            .edges
            .drain(..)
            .filter_map(|edge| edge.node)
            .collect();
        while let Some(child) = pending.pop() {
            if let Some(mut child) = Arc::into_inner(child) {
                pending.extend(child.edges.drain(..).filter_map(|edge| edge.node));
            }
        }
    }
}

impl<V: PartialEq> PartialEq for Node<V> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.leaf != b.leaf || a.prefix != b.prefix || a.edges.len() != b.edges.len() {
                return false;
            }
            for (x, y) in a.edges.iter().zip(&b.edges) {
                if x.label != y.label {
                    return false;
                }
                match (x.node.as_deref(), y.node.as_deref()) {
                    (Some(x), Some(y)) if std::ptr::eq(x, y) => {}
                    (Some(x), Some(y)) => pending.push((x, y)),
                    (None, None) => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

impl<V: fmt::Debug> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("prefix", &String::from_utf8_lossy(&self.prefix))
            .field("leaf", &self.leaf)
            .field("edges", &self.edges)
            .finish()
    }
}
