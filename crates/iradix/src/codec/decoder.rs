//! Tree snapshot decoder.

use std::sync::Arc;

use iradix_buffers::Reader;

use super::{CodecConfig, CodecError, ValueEncoder, ValueFraming};
use crate::node::{Edge, Leaf, Node};
use crate::tree::Tree;

/// A node whose header has been read and whose edges are still coming in.
struct Frame<V> {
    /// Label of the edge leading here; `None` for the node decoding started at.
    label: Option<u8>,
    leaf: Option<Arc<Leaf<V>>>,
    prefix: Vec<u8>,
    edges: Vec<Edge<V>>,
    remaining: usize,
}

impl<V> Frame<V> {
    fn finish(self) -> (Option<u8>, Node<V>) {
        (self.label, Node::new(self.leaf, self.prefix, self.edges))
    }
}

/// Tree snapshot decoder.
///
/// Every read is bounds-checked. Nodes are rebuilt with an explicit stack,
/// so hostile nesting depth cannot overflow the call stack, and every
/// decoded node and leaf gets a fresh watch.
pub struct TreeDecoder<'a> {
    pub reader: Reader<'a>,
    pub config: CodecConfig,
}

impl Default for TreeDecoder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TreeDecoder<'a> {
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            reader: Reader::new(&[]),
            config,
        }
    }

    /// Decodes a whole tree from `data`.
    ///
    /// Bytes after the size field are ignored. On error no part of the tree
    /// is returned.
    pub fn decode<V>(
        &mut self,
        values: Option<&dyn ValueEncoder<V>>,
        data: &'a [u8],
    ) -> Result<Tree<V>, CodecError> {
        self.reader.reset(data);
        let tree = self.read_tree(values)?;
        if self.reader.size() > 0 {
            tracing::trace!(trailing = self.reader.size(), "ignoring bytes after tree size");
        }
        tracing::debug!(size = tree.size, bytes = self.reader.x, "decoded radix tree");
        Ok(tree)
    }

    /// Reads `Bool(hasRoot) [Node] UInt64(size)`.
    ///
    /// The size is stored as read, not recounted from the leaves.
    pub fn read_tree<V>(
        &mut self,
        values: Option<&dyn ValueEncoder<V>>,
    ) -> Result<Tree<V>, CodecError> {
        let root = if self.reader.bool()? {
            Some(Arc::new(self.read_node(values)?))
        } else {
            None
        };
        let size = self.reader.u64()?;
        let size = usize::try_from(size).map_err(|_| CodecError::LengthOverflow {
            field: "size",
            len: size,
            limit: usize::MAX as u64,
        })?;
        Ok(Tree::from_parts(root, size))
    }

    /// Reads a node and everything below it.
    ///
    /// Edges keep the order they were read in.
    pub fn read_node<V>(
        &mut self,
        values: Option<&dyn ValueEncoder<V>>,
    ) -> Result<Node<V>, CodecError> {
        let mut stack: Vec<Frame<V>> = Vec::new();
        let mut frame = self.read_node_header(values, None)?;
        loop {
            if frame.remaining > 0 {
                frame.remaining -= 1;
                let label = self.reader.u8()?;
                if self.reader.bool()? {
                    let child = self.read_node_header(values, Some(label))?;
                    stack.push(std::mem::replace(&mut frame, child));
                } else {
                    frame.edges.push(Edge::new(label, None));
                }
                continue;
            }
            let (label, node) = frame.finish();
            match (label, stack.pop()) {
                (Some(label), Some(mut parent)) => {
                    parent.edges.push(Edge::new(label, Some(Arc::new(node))));
                    frame = parent;
                }
                _ => return Ok(node),
            }
        }
    }

    fn read_node_header<V>(
        &mut self,
        values: Option<&dyn ValueEncoder<V>>,
        label: Option<u8>,
    ) -> Result<Frame<V>, CodecError> {
        let leaf = if self.reader.bool()? {
            Some(Arc::new(self.read_leaf(values)?))
        } else {
            None
        };
        let prefix = self.read_bytes("prefix")?.to_vec();
        let remaining = self.read_len("edges", self.config.limits.max_edges)?;
        // Each edge takes at least a label and a flag.
        let edges = Vec::with_capacity(remaining.min(self.reader.size() / 2));
        Ok(Frame {
            label,
            leaf,
            prefix,
            edges,
            remaining,
        })
    }

    /// Reads `Bytes(key) Bool(hasValue) [Value]`.
    ///
    /// With inline framing and no value encoder, a present value's bytes are
    /// left unread; the stream is only decodable if the encoder side also
    /// had no value encoder.
    pub fn read_leaf<V>(
        &mut self,
        values: Option<&dyn ValueEncoder<V>>,
    ) -> Result<Leaf<V>, CodecError> {
        let key = self.read_bytes("key")?.to_vec();
        if !self.reader.bool()? {
            return Ok(Leaf::new(key, None));
        }
        let value = match (self.config.value_framing, values) {
            (ValueFraming::Inline, Some(values)) => {
                let src = self.reader.rest();
                let (value, rest) = values.decode(src)?;
                let consumed = src.len().checked_sub(rest.len()).ok_or_else(|| {
                    CodecError::ValueEncodingFailed(
                        "value decoder returned more bytes than it was given".to_string(),
                    )
                })?;
                self.reader.skip(consumed)?;
                value
            }
            (ValueFraming::Inline, None) => {
                tracing::trace!("value present but no value encoder supplied");
                None
            }
            (ValueFraming::LengthPrefixed, Some(values)) => {
                let payload = self.read_bytes("value")?;
                values.decode(payload)?.0
            }
            (ValueFraming::LengthPrefixed, None) => {
                self.read_bytes("value")?;
                tracing::trace!("skipped framed value, no value encoder supplied");
                None
            }
        };
        Ok(Leaf::new(key, value))
    }

    fn read_len(&mut self, field: &'static str, limit: usize) -> Result<usize, CodecError> {
        let len = self.reader.u64()?;
        if len > limit as u64 {
            return Err(CodecError::LengthOverflow {
                field,
                len,
                limit: limit as u64,
            });
        }
        Ok(len as usize)
    }

    fn read_bytes(&mut self, field: &'static str) -> Result<&'a [u8], CodecError> {
        let len = self.read_len(field, self.config.limits.max_bytes_len)?;
        Ok(self.reader.buf(len)?)
    }
}
