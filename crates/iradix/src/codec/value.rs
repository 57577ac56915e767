//! Pluggable value encoding.
//!
//! The tree codec never looks inside a value. It hands each leaf value to
//! a caller-supplied [`ValueEncoder`], or leaves values out entirely when
//! none is supplied.

use std::fmt;
use std::marker::PhantomData;

use iradix_buffers::{Reader, Writer};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ValueError;

/// Converts leaf values to and from bytes.
///
/// The same encoder (or none) must be used on both sides of a snapshot.
pub trait ValueEncoder<V> {
    /// Appends the encoded form of `value` to `dst`. `None` is a logically
    /// absent value and must be encodable too.
    fn encode(&self, dst: &mut Writer, value: Option<&V>) -> Result<(), ValueError>;

    /// Decodes one value from the front of `src`, returning it together
    /// with the unconsumed remainder of `src`.
    fn decode<'a>(&self, src: &'a [u8]) -> Result<(Option<V>, &'a [u8]), ValueError>;
}

/// Raw byte values: `Bool(present) [Bytes(value)]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesValueEncoder;

impl ValueEncoder<Vec<u8>> for BytesValueEncoder {
    fn encode(&self, dst: &mut Writer, value: Option<&Vec<u8>>) -> Result<(), ValueError> {
        dst.bool(value.is_some());
        if let Some(value) = value {
            dst.bytes(value);
        }
        Ok(())
    }

    fn decode<'a>(&self, src: &'a [u8]) -> Result<(Option<Vec<u8>>, &'a [u8]), ValueError> {
        let mut reader = Reader::new(src);
        let value = if reader.bool()? {
            Some(reader.bytes()?.to_vec())
        } else {
            None
        };
        Ok((value, reader.rest()))
    }
}

/// Any serde type, stored as length-prefixed JSON text:
/// `Bool(present) [Bytes(json)]`.
pub struct JsonValueEncoder<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonValueEncoder<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonValueEncoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonValueEncoder<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonValueEncoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JsonValueEncoder")
    }
}

impl<T: Serialize + DeserializeOwned> ValueEncoder<T> for JsonValueEncoder<T> {
    fn encode(&self, dst: &mut Writer, value: Option<&T>) -> Result<(), ValueError> {
        let Some(value) = value else {
            dst.bool(false);
            return Ok(());
        };
        let json = serde_json::to_vec(value).map_err(|e| ValueError::Custom(e.to_string()))?;
        dst.bool(true);
        dst.bytes(&json);
        Ok(())
    }

    fn decode<'a>(&self, src: &'a [u8]) -> Result<(Option<T>, &'a [u8]), ValueError> {
        let mut reader = Reader::new(src);
        if !reader.bool()? {
            return Ok((None, reader.rest()));
        }
        let json = reader.bytes()?;
        let value = serde_json::from_slice(json).map_err(|e| ValueError::Custom(e.to_string()))?;
        Ok((Some(value), reader.rest()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn bytes_value_layout() {
        let mut writer = Writer::new();
        BytesValueEncoder.encode(&mut writer, Some(&vec![7])).unwrap();
        BytesValueEncoder.encode(&mut writer, None).unwrap();
        let data = writer.flush();
        assert_eq!(data, vec![1, 0, 0, 0, 0, 0, 0, 0, 1, 7, 0]);

        let (first, rest) = BytesValueEncoder.decode(&data).unwrap();
        assert_eq!(first, Some(vec![7]));
        let (second, rest) = BytesValueEncoder.decode(rest).unwrap();
        assert_eq!(second, None);
        assert!(rest.is_empty());
    }

    #[test]
    fn bytes_value_truncated() {
        let err = BytesValueEncoder.decode(&[1, 0, 0]).unwrap_err();
        assert_eq!(err, ValueError::UnexpectedEof);
    }

    #[test]
    fn json_value_leaves_tail() {
        let encoder = JsonValueEncoder::<Value>::new();
        let mut writer = Writer::new();
        encoder.encode(&mut writer, Some(&json!({"a": [1, 2]}))).unwrap();
        writer.u8(0xee);
        let data = writer.flush();
        let (value, rest) = encoder.decode(&data).unwrap();
        assert_eq!(value, Some(json!({"a": [1, 2]})));
        assert_eq!(rest, &[0xee]);
    }

    #[test]
    fn json_value_rejects_garbage() {
        let mut writer = Writer::new();
        writer.bool(true);
        writer.bytes(b"{nope");
        let data = writer.flush();
        let err = JsonValueEncoder::<Value>::new().decode(&data).unwrap_err();
        assert!(matches!(err, ValueError::Custom(_)));
    }
}
