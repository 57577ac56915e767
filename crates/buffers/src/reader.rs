//! Binary buffer reader with cursor tracking.

use crate::BufferError;

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position. Every read checks the remaining
/// length first and leaves the cursor untouched when it fails.
///
/// # Example
///
/// ```
/// use iradix_buffers::{BufferError, Reader};
///
/// let data = [0x01, 0x02];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8(), Ok(0x01));
/// assert!(matches!(reader.u64(), Err(BufferError::EndOfBuffer { .. })));
/// assert_eq!(reader.u8(), Ok(0x02));
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Resets the reader with a new byte slice.
    pub fn reset(&mut self, uint8: &'a [u8]) {
        self.x = 0;
        self.uint8 = uint8;
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// Returns the unread tail of the input.
    pub fn rest(&self) -> &'a [u8] {
        &self.uint8[self.x..]
    }

    fn assert_size(&self, needed: usize) -> Result<(), BufferError> {
        let remaining = self.size();
        if needed > remaining {
            return Err(BufferError::EndOfBuffer { needed, remaining });
        }
        Ok(())
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.assert_size(length)?;
        self.x += length;
        Ok(())
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.assert_size(size)?;
        let x = self.x;
        self.x += size;
        Ok(&self.uint8[x..x + size])
    }

    /// Reads one raw byte.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.assert_size(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads an unsigned 64-bit integer (big-endian).
    #[inline]
    pub fn u64(&mut self) -> Result<u64, BufferError> {
        let mut octets = [0u8; 8];
        octets.copy_from_slice(self.buf(8)?);
        Ok(u64::from_be_bytes(octets))
    }

    /// Reads a boolean. Only the byte `1` is true; every other value is false.
    #[inline]
    pub fn bool(&mut self) -> Result<bool, BufferError> {
        Ok(self.u8()? == 1)
    }

    /// Reads a u64 length prefix and converts it to `usize`.
    pub fn len_prefix(&mut self) -> Result<usize, BufferError> {
        let len = self.u64()?;
        usize::try_from(len).map_err(|_| BufferError::Overflow(len))
    }

    /// Reads a length-prefixed byte string.
    ///
    /// On failure the cursor is restored to where it was before the length.
    pub fn bytes(&mut self) -> Result<&'a [u8], BufferError> {
        let start = self.x;
        let res = self.len_prefix().and_then(|len| self.buf(len));
        if res.is_err() {
            self.x = start;
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8(), Ok(0x01));
        assert_eq!(reader.u8(), Ok(0x02));
        assert_eq!(reader.u8(), Ok(0x03));
        assert_eq!(
            reader.u8(),
            Err(BufferError::EndOfBuffer {
                needed: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn test_u64() {
        let data = [0, 0, 0, 0, 0, 0, 0x01, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u64(), Ok(0x0102));
        assert_eq!(reader.size(), 0);
    }

    #[test]
    fn test_u64_short_keeps_cursor() {
        let data = [0, 0, 0];
        let mut reader = Reader::new(&data);
        assert!(reader.u64().is_err());
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_bool_only_one_is_true() {
        let data = [1, 0, 2, 0xff];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.bool(), Ok(true));
        assert_eq!(reader.bool(), Ok(false));
        assert_eq!(reader.bool(), Ok(false));
        assert_eq!(reader.bool(), Ok(false));
    }

    #[test]
    fn test_bytes() {
        let data = [0, 0, 0, 0, 0, 0, 0, 2, b'h', b'i', 9];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.bytes(), Ok(&b"hi"[..]));
        assert_eq!(reader.rest(), &[9]);
    }

    #[test]
    fn test_bytes_length_past_end() {
        let data = [0, 0, 0, 0, 0, 0, 0, 5, b'h'];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.bytes(),
            Err(BufferError::EndOfBuffer {
                needed: 5,
                remaining: 1
            })
        );
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_skip() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        reader.skip(2).unwrap();
        assert_eq!(reader.u8(), Ok(0x03));
        assert!(reader.skip(2).is_err());
    }
}
