//! Append-only output buffer for serialized objects.

use super::field_id::FieldId;
use super::vl::encode_vl_length;
use crate::error::Result;

/// Accumulates canonical bytes.
#[derive(Debug, Clone, Default)]
pub struct BinarySerializer {
    buf: Vec<u8>,
}

impl BinarySerializer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Appends raw bytes.
    pub fn put(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Appends a single byte.
    pub fn put_u8(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Appends the one- to three-byte encoding of `id`.
    pub fn write_field_id(&mut self, id: FieldId) {
        id.write_to(&mut self.buf);
    }

    /// Writes `payload` behind its VL length prefix.
    pub fn write_length_prefixed(&mut self, payload: &[u8]) -> Result<()> {
        let prefix = encode_vl_length(payload.len())?;
        self.buf.extend_from_slice(&prefix);
        self.buf.extend_from_slice(payload);
        Ok(())
    }

    /// Direct access for codecs that append in place.
    pub fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the buffer, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
