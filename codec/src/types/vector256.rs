//! A VL-encoded list of 256-bit hashes (`Amendments`, `Hashes`, `Indexes`).

use super::hash::Hash256;
use super::WireType;
use crate::binary::BinaryParser;
use crate::config::HASH256_LENGTH;
use crate::error::{CodecError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Vector256(pub Vec<Hash256>);

impl Vector256 {
    pub fn new(hashes: Vec<Hash256>) -> Self {
        Self(hashes)
    }

    pub fn hashes(&self) -> &[Hash256] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl WireType for Vector256 {
    const TYPE_NAME: &'static str = "Vector256";

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        for hash in &self.0 {
            hash.write_to(out)?;
        }
        Ok(())
    }

    /// Without a hint the vector runs to the end of the input.
    fn read_from(parser: &mut BinaryParser<'_>, length_hint: Option<usize>) -> Result<Self> {
        let length = length_hint.unwrap_or_else(|| parser.remaining());
        if length % HASH256_LENGTH != 0 {
            return Err(CodecError::InvalidLength(format!(
                "Vector256 length {length} is not a multiple of {HASH256_LENGTH}"
            )));
        }
        let mut sub = parser.sub_parser(length)?;
        let mut hashes = Vec::with_capacity(length / HASH256_LENGTH);
        while !sub.is_end() {
            hashes.push(Hash256::read_from(&mut sub, None)?);
        }
        Ok(Self(hashes))
    }
}
