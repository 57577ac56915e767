//! Persistent radix tree snapshots.

use std::fmt;
use std::sync::Arc;

use crate::node::{Edge, Leaf, Node};

/// An immutable radix tree snapshot.
///
/// Updates return a new snapshot that shares every untouched subtree with
/// the old one; the old snapshot stays valid and unchanged.
pub struct Tree<V> {
    pub(crate) root: Option<Arc<Node<V>>>,
    pub(crate) size: usize,
}

impl<V> Tree<V> {
    /// Creates an empty tree: no root, no elements.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Assembles a tree from a root and an element count.
    ///
    /// The count is taken on trust and not checked against the leaves.
    pub fn from_parts(root: Option<Arc<Node<V>>>, size: usize) -> Self {
        Self { root, size }
    }

    pub fn root(&self) -> Option<&Arc<Node<V>>> {
        self.root.as_ref()
    }

    /// Number of distinct keys, as recorded by the snapshot.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Looks up the leaf stored under exactly `key`.
    pub fn get_leaf(&self, key: &[u8]) -> Option<&Arc<Leaf<V>>> {
        let mut node = self.root.as_deref()?;
        let mut search = key;
        loop {
            if search.is_empty() {
                return node.leaf.as_ref();
            }
            node = node.edge(search[0]).map(|child| &**child)?;
            search = search.strip_prefix(node.prefix.as_slice())?;
        }
    }

    /// Looks up the value stored under `key`.
    ///
    /// Returns `None` both for a missing key and for a key whose value is
    /// absent; use [`Tree::contains_key`] to tell them apart.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.get_leaf(key).and_then(|leaf| leaf.value())
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get_leaf(key).is_some()
    }

    /// All leaves in key order.
    pub fn leaves(&self) -> Vec<&Leaf<V>> {
        let mut out = Vec::with_capacity(self.size);
        let mut stack: Vec<&Node<V>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            if let Some(leaf) = node.leaf.as_deref() {
                out.push(leaf);
            }
            stack.extend(
                node.edges
                    .iter()
                    .rev()
                    .filter_map(|edge| edge.node.as_deref()),
            );
        }
        out
    }

    /// Inserts or updates `key`, returning the new snapshot and the leaf it
    /// replaced, if any.
    ///
    /// Every node copied on the way down has its watch signaled, as does
    /// the replaced leaf.
    pub fn insert(
        &self,
        key: impl AsRef<[u8]>,
        value: Option<V>,
    ) -> (Tree<V>, Option<Arc<Leaf<V>>>) {
        let key = key.as_ref();
        let (root, old) = match self.root.as_deref() {
            Some(root) => insert_at(root, key, key, value),
            None => insert_at(&Node::new(None, "", Vec::new()), key, key, value),
        };
        let size = if old.is_some() { self.size } else { self.size + 1 };
        let tree = Tree {
            root: Some(Arc::new(root)),
            size,
        };
        (tree, old)
    }
}

/// Copies `node` for writing and marks the original as mutated.
fn write_node<V>(node: &Node<V>) -> Node<V> {
    node.watch.signal();
    node.copy()
}

fn longest_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn insert_at<V>(
    node: &Node<V>,
    key: &[u8],
    search: &[u8],
    value: Option<V>,
) -> (Node<V>, Option<Arc<Leaf<V>>>) {
    let Some(&label) = search.first() else {
        let mut copy = write_node(node);
        let old = copy.leaf.replace(Arc::new(Leaf::new(key, value)));
        if let Some(old) = &old {
            old.watch.signal();
        }
        return (copy, old);
    };

    let found = node
        .edge_index(label)
        .ok()
        .and_then(|idx| node.edges[idx].node.clone().map(|child| (idx, child)));
    let Some((idx, child)) = found else {
        let leaf = Arc::new(Leaf::new(key, value));
        let mut copy = write_node(node);
        copy.add_edge(Edge::new(
            label,
            Some(Arc::new(Node::new(Some(leaf), search, Vec::new()))),
        ));
        return (copy, None);
    };

    let common = longest_prefix(search, &child.prefix);
    if common == child.prefix.len() {
        let (new_child, old) = insert_at(&child, key, &search[common..], value);
        let mut copy = write_node(node);
        copy.edges[idx].node = Some(Arc::new(new_child));
        return (copy, old);
    }

    // The new key diverges inside the child's prefix: split it.
    let mut copy = write_node(node);
    let mut split = Node::new(None, &search[..common], Vec::new());
    let mut moved = write_node(&child);
    let moved_label = moved.prefix[common];
    moved.prefix = moved.prefix.split_off(common);
    split.add_edge(Edge::new(moved_label, Some(Arc::new(moved))));

    let leaf = Arc::new(Leaf::new(key, value));
    let rest = &search[common..];
    match rest.first() {
        None => split.leaf = Some(leaf),
        Some(&rest_label) => split.add_edge(Edge::new(
            rest_label,
            Some(Arc::new(Node::new(Some(leaf), rest, Vec::new()))),
        )),
    }
    copy.edges[idx].node = Some(Arc::new(split));
    (copy, None)
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for Tree<V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            size: self.size,
        }
    }
}

impl<V: PartialEq> PartialEq for Tree<V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.root == other.root
    }
}

impl<V: fmt::Debug> fmt::Debug for Tree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("root", &self.root)
            .finish()
    }
}
