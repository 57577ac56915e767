//! Binary buffer utilities for iradix snapshots.
//!
//! This crate provides the primitive layer of the snapshot format: fixed
//! width big-endian integers, single-byte booleans and length-prefixed byte
//! strings.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking
//! - [`Writer`] - Appends binary data to a growing buffer
//!
//! Every [`Reader`] method is bounds-checked and reports
//! [`BufferError::EndOfBuffer`] instead of slicing past the input.
//!
//! # Example
//!
//! ```
//! use iradix_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.bool(true);
//! writer.u64(0x0203);
//! writer.bytes(b"hello");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.bool(), Ok(true));
//! assert_eq!(reader.u64(), Ok(0x0203));
//! assert_eq!(reader.bytes(), Ok(&b"hello"[..]));
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error type for buffer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer: needed {needed} bytes, {remaining} remaining")]
    EndOfBuffer { needed: usize, remaining: usize },
    /// A length prefix does not fit the platform's address space.
    #[error("length {0} does not fit in usize")]
    Overflow(u64),
}
