//! Codec configuration.

use serde::{Deserialize, Serialize};

/// How leaf values are laid out after their presence flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFraming {
    /// The value encoder's bytes follow the flag directly.
    ///
    /// Decoding without a value encoder cannot skip the payload, so both
    /// sides must agree on whether an encoder is used.
    #[default]
    Inline,
    /// The value encoder's bytes are wrapped in a u64 length prefix, which
    /// lets a decoder without a value encoder skip them.
    LengthPrefixed,
}

/// Upper bounds applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Largest key, prefix or framed value accepted, in bytes.
    pub max_bytes_len: usize,
    /// Largest edge count accepted for a single node.
    ///
    /// Only the decoder checks this. Trees built through `insert` never
    /// exceed 256 edges per node, but a node assembled by hand with
    /// repeated labels can, and it still encodes; decoding it back needs a
    /// decoder whose limit covers its edge count.
    pub max_edges: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_bytes_len: 1 << 30,
            max_edges: 256,
        }
    }
}

/// Settings shared by [`TreeEncoder`](super::TreeEncoder) and
/// [`TreeDecoder`](super::TreeDecoder).
///
/// Loadable from any serde format; missing fields take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub value_framing: ValueFraming,
    pub limits: DecodeLimits,
}
