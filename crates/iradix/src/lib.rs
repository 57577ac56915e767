//! Immutable radix trees and their binary snapshot codec.
//!
//! A [`Tree`] is a persistent, copy-on-write radix trie keyed by byte
//! strings. [`encode_tree`] flattens a snapshot into a self-contained byte
//! sequence and [`decode_tree`] rebuilds a fully independent tree from it.
//! Values are opaque to the codec; a [`ValueEncoder`] supplied on each call
//! turns them into bytes, and without one values are stored as absent.
//!
//! # Example
//!
//! ```
//! use iradix::{decode_tree, encode_tree, BytesValueEncoder, Tree, ValueEncoder};
//!
//! let tree = Tree::new()
//!     .insert("foo", Some(b"1".to_vec())).0
//!     .insert("foobar", Some(b"2".to_vec())).0;
//!
//! let values: &dyn ValueEncoder<Vec<u8>> = &BytesValueEncoder;
//! let bytes = encode_tree(Some(values), &tree).unwrap();
//! let back = decode_tree(Some(values), &bytes).unwrap();
//!
//! assert_eq!(back.get(b"foobar"), Some(&b"2".to_vec()));
//! assert_eq!(back, tree);
//! ```

pub mod codec;
mod node;
mod tree;
mod watch;

pub use codec::{
    decode_tree, encode_tree, BytesValueEncoder, CodecConfig, CodecError, DecodeLimits,
    JsonValueEncoder, TreeDecoder, TreeEncoder, ValueEncoder, ValueError, ValueFraming,
};
pub use node::{Edge, Leaf, Node};
pub use tree::Tree;
pub use watch::Watch;
