//! Append-only binary buffer writer.

/// A binary buffer writer that appends big-endian encoded values to a
/// growing byte vector.
///
/// # Example
///
/// ```
/// use iradix_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u64(1);
/// assert_eq!(writer.flush(), vec![0, 0, 0, 0, 0, 0, 0, 1]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    /// The underlying buffer.
    pub uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { uint8: Vec::new() }
    }

    /// Creates an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Clears the buffer, keeping its allocation.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Returns the bytes written so far without consuming them.
    pub fn as_slice(&self) -> &[u8] {
        &self.uint8
    }

    /// Takes the written bytes, leaving the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    /// Writes a single raw byte.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    /// Writes an unsigned 64-bit integer (big-endian).
    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a boolean as one byte: `1` for true, `0` for false.
    #[inline]
    pub fn bool(&mut self, val: bool) {
        self.u8(u8::from(val));
    }

    /// Writes raw bytes with no length prefix.
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Writes a length-prefixed byte string: u64 length, then the bytes.
    pub fn bytes(&mut self, data: &[u8]) {
        self.u64(data.len() as u64);
        self.buf(data);
    }
}

impl From<Writer> for Vec<u8> {
    fn from(writer: Writer) -> Self {
        writer.uint8
    }
}
