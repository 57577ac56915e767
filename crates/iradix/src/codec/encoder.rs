//! Tree snapshot encoder.

use iradix_buffers::Writer;

use super::{CodecConfig, CodecError, ValueEncoder, ValueFraming};
use crate::node::{Edge, Leaf, Node};
use crate::tree::Tree;

/// Pending work while walking the tree in pre-order.
enum Step<'t, V> {
    Node(&'t Node<V>),
    Edge(&'t Edge<V>),
}

/// Tree snapshot encoder.
///
/// Walks the tree depth-first with an explicit stack, so encoding depth is
/// not limited by the thread's call stack. Output is deterministic: the same
/// tree and value encoder always produce the same bytes.
#[derive(Debug, Default)]
pub struct TreeEncoder {
    pub writer: Writer,
    pub config: CodecConfig,
    scratch: Writer,
}

impl TreeEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Encodes a whole tree and returns the bytes.
    ///
    /// Without a value encoder every leaf value is written as absent. If the
    /// value encoder fails, nothing is returned but the error.
    pub fn encode<V>(
        &mut self,
        values: Option<&dyn ValueEncoder<V>>,
        tree: &Tree<V>,
    ) -> Result<Vec<u8>, CodecError> {
        self.writer.reset();
        match self.write_tree(values, tree) {
            Ok(nodes) => {
                let out = self.writer.flush();
                tracing::debug!(
                    size = tree.size,
                    nodes,
                    bytes = out.len(),
                    "encoded radix tree"
                );
                Ok(out)
            }
            Err(err) => {
                self.writer.reset();
                Err(err)
            }
        }
    }

    /// Writes `Bool(hasRoot) [Node] UInt64(size)`, returning the number of
    /// nodes written.
    pub fn write_tree<V>(
        &mut self,
        values: Option<&dyn ValueEncoder<V>>,
        tree: &Tree<V>,
    ) -> Result<usize, CodecError> {
        let nodes = match tree.root.as_deref() {
            Some(root) => {
                self.writer.bool(true);
                self.write_node(values, root)?
            }
            None => {
                self.writer.bool(false);
                0
            }
        };
        self.writer.u64(tree.size as u64);
        Ok(nodes)
    }

    /// Writes a node and everything below it, returning the number of nodes
    /// written.
    ///
    /// Edges are written in stored order.
    pub fn write_node<V>(
        &mut self,
        values: Option<&dyn ValueEncoder<V>>,
        node: &Node<V>,
    ) -> Result<usize, CodecError> {
        let mut nodes = 0;
        let mut stack = vec![Step::Node(node)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Node(node) => {
                    nodes += 1;
                    match node.leaf.as_deref() {
                        Some(leaf) => {
                            self.writer.bool(true);
                            self.write_leaf(values, leaf)?;
                        }
                        None => self.writer.bool(false),
                    }
                    self.writer.bytes(&node.prefix);
                    self.writer.u64(node.edges.len() as u64);
                    stack.extend(node.edges.iter().rev().map(Step::Edge));
                }
                Step::Edge(edge) => {
                    self.writer.u8(edge.label);
                    match edge.node.as_deref() {
                        Some(child) => {
                            self.writer.bool(true);
                            stack.push(Step::Node(child));
                        }
                        None => self.writer.bool(false),
                    }
                }
            }
        }
        Ok(nodes)
    }

    /// Writes `Bytes(key) Bool(hasValue) [Value]`.
    ///
    /// The presence flag records whether a value encoder was supplied, not
    /// whether the value itself is present.
    pub fn write_leaf<V>(
        &mut self,
        values: Option<&dyn ValueEncoder<V>>,
        leaf: &Leaf<V>,
    ) -> Result<(), CodecError> {
        self.writer.bytes(&leaf.key);
        let Some(values) = values else {
            self.writer.bool(false);
            return Ok(());
        };
        self.writer.bool(true);
        match self.config.value_framing {
            ValueFraming::Inline => values.encode(&mut self.writer, leaf.value.as_ref())?,
            ValueFraming::LengthPrefixed => {
                self.scratch.reset();
                values.encode(&mut self.scratch, leaf.value.as_ref())?;
                self.writer.bytes(self.scratch.as_slice());
            }
        }
        Ok(())
    }
}
