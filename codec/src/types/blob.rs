//! Arbitrary binary payloads.
//!
//! A blob's encoding is just its bytes; the serializer writes the VL prefix
//! in front of it because every Blob field is VL-encoded.

use std::fmt;
use std::str::FromStr;

use super::WireType;
use crate::binary::BinaryParser;
use crate::error::{CodecError, Result};

/// Variable-length binary data (public keys, signatures, memos, ...).
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob(Vec<u8>);

impl Blob {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Ok(Self(hex::decode(s)?))
    }
}

impl WireType for Blob {
    const TYPE_NAME: &'static str = "Blob";

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&self.0);
        Ok(())
    }

    /// Without a hint the blob runs to the end of the input.
    fn read_from(parser: &mut BinaryParser<'_>, length_hint: Option<usize>) -> Result<Self> {
        let length = length_hint.unwrap_or_else(|| parser.remaining());
        Ok(Self(parser.read_bytes(length)?.to_vec()))
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl FromStr for Blob {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blob({})", self.to_hex())
    }
}
