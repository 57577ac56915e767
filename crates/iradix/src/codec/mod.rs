//! Binary snapshot codec for radix trees.
//!
//! Wire format (all integers big-endian):
//!
//! ```text
//! Tree   := Bool(hasRoot) [Node] UInt64(size)
//! Node   := Bool(hasLeaf) [Leaf] Bytes(prefix) Edges
//! Leaf   := Bytes(key) Bool(hasValue) [Value]
//! Edges  := UInt64(count) Edge{count}
//! Edge   := Byte(label) Bool(hasNode) [Node]
//! Bool   := Byte   (1 = true; any other byte reads as false)
//! UInt64 := 8 raw bytes, big-endian
//! Bytes  := UInt64(length) Byte{length}
//! Value  := whatever the ValueEncoder writes
//! ```
//!
//! With [`ValueFraming::LengthPrefixed`] the value is wrapped as
//! `Bytes(Value)`. There is no header, version or checksum: the reader must
//! know which value encoder, if any, produced a snapshot.

mod config;
mod decoder;
mod encoder;
mod error;
mod value;

pub use config::{CodecConfig, DecodeLimits, ValueFraming};
pub use decoder::TreeDecoder;
pub use encoder::TreeEncoder;
pub use error::{CodecError, ValueError};
pub use value::{BytesValueEncoder, JsonValueEncoder, ValueEncoder};

use crate::tree::Tree;

/// Encodes `tree` with the default configuration.
///
/// # Example
///
/// ```
/// use iradix::{decode_tree, encode_tree, Tree};
///
/// let (tree, _) = Tree::<()>::new().insert("foo", None);
/// let bytes = encode_tree(None, &tree).unwrap();
/// let back: Tree<()> = decode_tree(None, &bytes).unwrap();
/// assert_eq!(back, tree);
/// ```
pub fn encode_tree<V>(
    values: Option<&dyn ValueEncoder<V>>,
    tree: &Tree<V>,
) -> Result<Vec<u8>, CodecError> {
    TreeEncoder::new().encode(values, tree)
}

/// Decodes a tree with the default configuration.
pub fn decode_tree<V>(
    values: Option<&dyn ValueEncoder<V>>,
    data: &[u8],
) -> Result<Tree<V>, CodecError> {
    TreeDecoder::new().decode(values, data)
}
