//! A bounds-checked cursor over a serialized byte stream.

use super::field_id::FieldId;
use super::vl::decode_vl_length;
use crate::error::{CodecError, Result};

/// Reads wire values from a borrowed byte slice.
///
/// Every read checks the remaining length first and fails with
/// [`CodecError::Truncated`] instead of panicking.
#[derive(Debug, Clone)]
pub struct BinaryParser<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryParser<'a> {
    /// Creates a parser positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// `true` once every byte has been consumed.
    pub fn is_end(&self) -> bool {
        self.position >= self.data.len()
    }

    /// The unread tail of the input.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    /// Returns the next byte without consuming it.
    pub fn peek(&self) -> Result<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(CodecError::truncated(1, 0))
    }

    /// Consumes exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::truncated(n, self.remaining()));
        }
        let slice = &self.data[self.position..self.position + n];
        self.position += n;
        Ok(slice)
    }

    /// Consumes exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Consumes a field identifier.
    pub fn read_field_id(&mut self) -> Result<FieldId> {
        let (id, consumed) = FieldId::decode(self.rest())?;
        self.position += consumed;
        Ok(id)
    }

    /// Consumes a VL prefix and checks that the payload it announces is
    /// actually present.
    pub fn read_vl_length(&mut self) -> Result<usize> {
        let (length, consumed) = decode_vl_length(self.rest())?;
        self.position += consumed;
        if length > self.remaining() {
            return Err(CodecError::truncated(length, self.remaining()));
        }
        Ok(length)
    }

    /// Splits off a sub-parser over the next `n` bytes and advances past them.
    pub fn sub_parser(&mut self, n: usize) -> Result<BinaryParser<'a>> {
        Ok(BinaryParser::new(self.read_bytes(n)?))
    }
}
