//! Compact field identifiers.
//!
//! Every serialized field starts with an identifier packing its type code and
//! field code. Codes below 16 take a nibble, larger codes a whole byte:
//!
//! ```text
//! type < 16, field < 16   [type << 4 | field]
//! type < 16, field >= 16  [type << 4, field]
//! type >= 16, field < 16  [field, type]
//! type >= 16, field >= 16 [0x00, type, field]
//! ```
//!
//! Decoding rejects the extended forms when the code would have fit in a
//! nibble, so each (type, field) pair has exactly one byte representation.

use std::fmt;

use crate::config::FIELD_ID_NIBBLE_LIMIT;
use crate::error::{CodecError, Result};

/// A `(type code, field code)` pair as it appears on the wire.
///
/// The derived ordering compares type code first, then field code, which is
/// the canonical field order of a serialized object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    /// Registry type code (1..=255).
    pub type_code: u8,
    /// Ordinal of the field within its type (1..=255).
    pub field_code: u8,
}

impl FieldId {
    /// Creates a field ID. Zero codes are not representable on the wire.
    pub fn new(type_code: u8, field_code: u8) -> Result<Self> {
        if type_code == 0 || field_code == 0 {
            return Err(CodecError::InvalidValue(format!(
                "field id codes must be non-zero (type {type_code}, field {field_code})"
            )));
        }
        Ok(Self {
            type_code,
            field_code,
        })
    }

    /// Number of bytes [`encode`](Self::encode) produces: 1, 2 or 3.
    pub fn encoded_len(&self) -> usize {
        match (
            self.type_code < FIELD_ID_NIBBLE_LIMIT,
            self.field_code < FIELD_ID_NIBBLE_LIMIT,
        ) {
            (true, true) => 1,
            (false, false) => 3,
            _ => 2,
        }
    }

    /// Appends the wire form of this identifier to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        let (t, f) = (self.type_code, self.field_code);
        match (t < FIELD_ID_NIBBLE_LIMIT, f < FIELD_ID_NIBBLE_LIMIT) {
            (true, true) => out.push((t << 4) | f),
            (true, false) => out.extend_from_slice(&[t << 4, f]),
            (false, true) => out.extend_from_slice(&[f, t]),
            (false, false) => out.extend_from_slice(&[0x00, t, f]),
        }
    }

    /// Returns the wire form of this identifier.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut out);
        out
    }

    /// Parses an identifier from the front of `bytes`, returning it together
    /// with the number of bytes consumed.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        let first = *bytes.first().ok_or(CodecError::truncated(1, 0))?;
        let mut consumed = 1;

        let mut type_code = first >> 4;
        let mut field_code = first & 0x0F;

        if type_code == 0 {
            type_code = *bytes
                .get(consumed)
                .ok_or(CodecError::truncated(consumed + 1, bytes.len()))?;
            consumed += 1;
            if type_code < FIELD_ID_NIBBLE_LIMIT {
                return Err(CodecError::MalformedInput(format!(
                    "non-canonical field id: type code {type_code} in extended form"
                )));
            }
        }

        if field_code == 0 {
            field_code = *bytes
                .get(consumed)
                .ok_or(CodecError::truncated(consumed + 1, bytes.len()))?;
            consumed += 1;
            if field_code < FIELD_ID_NIBBLE_LIMIT {
                return Err(CodecError::MalformedInput(format!(
                    "non-canonical field id: field code {field_code} in extended form"
                )));
            }
        }

        Ok((
            Self {
                type_code,
                field_code,
            },
            consumed,
        ))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.type_code, self.field_code)
    }
}
