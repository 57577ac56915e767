//! Snapshot codec error types.

use iradix_buffers::BufferError;
use thiserror::Error;

/// Error type for tree snapshot encoding and decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Fewer bytes remain than the next field needs.
    #[error("truncated input")]
    TruncatedInput,
    /// A length, count or size field is larger than the decoder accepts.
    #[error("{field} length {len} exceeds limit {limit}")]
    LengthOverflow {
        field: &'static str,
        len: u64,
        limit: u64,
    },
    /// The value encoder reported a failure.
    #[error("value encoding failed: {0}")]
    ValueEncodingFailed(String),
}

impl From<BufferError> for CodecError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer { .. } => CodecError::TruncatedInput,
            BufferError::Overflow(len) => CodecError::LengthOverflow {
                field: "length",
                len,
                limit: usize::MAX as u64,
            },
        }
    }
}

/// Error type for [`ValueEncoder`](super::ValueEncoder) implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("unexpected end of value payload")]
    UnexpectedEof,
    #[error("{0}")]
    Custom(String),
}

impl From<BufferError> for ValueError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer { .. } => ValueError::UnexpectedEof,
            other => ValueError::Custom(other.to_string()),
        }
    }
}

impl From<ValueError> for CodecError {
    fn from(err: ValueError) -> Self {
        match err {
            ValueError::UnexpectedEof => CodecError::TruncatedInput,
            ValueError::Custom(msg) => CodecError::ValueEncodingFailed(msg),
        }
    }
}
