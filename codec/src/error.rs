//! Error types for the binary codec and signing pipeline.
//!
//! Every fallible operation returns a [`CodecError`]. There is no partial
//! output: an encode or decode either produces the complete canonical result
//! or one of these errors.
//!
//! A cryptographically invalid signature is *not* an error. Verification
//! returns `Ok(false)` for that case and reserves `Err` for inputs that
//! cannot be interpreted at all.

use thiserror::Error;

/// Errors raised by the type codecs, the serializer and the signing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The byte stream is structurally broken (bad sentinel, non-canonical
    /// field order, trailing garbage, ...).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Fewer bytes remain than the value being read requires.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the reader needed.
        needed: usize,
        /// Bytes that were actually left.
        remaining: usize,
    },

    /// A VL length is out of range, uses a reserved prefix byte, or a field
    /// carries a length its type does not allow.
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// A field name or field identifier has no registry entry.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A value violates its type's invariants.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// The value variant supplied for a field does not match its declared type.
    #[error("type mismatch for field {field}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Field name.
        field: String,
        /// Declared type name.
        expected: String,
        /// Variant that was supplied.
        found: String,
    },

    /// A field references a type the registry does not know or cannot encode.
    #[error("missing type: {0}")]
    MissingType(String),

    /// The schema table itself is inconsistent.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// A JSON document does not have the shape the mapping expects.
    #[error("json error: {0}")]
    Json(String),
}

impl CodecError {
    /// Shorthand for a [`CodecError::Truncated`].
    pub fn truncated(needed: usize, remaining: usize) -> Self {
        Self::Truncated { needed, remaining }
    }

    /// `true` for the malformed-input class: structurally broken or short
    /// byte streams.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_) | Self::Truncated { .. })
    }

    /// `true` for errors describing a value that violates its type.
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidValue(_) | Self::TypeMismatch { .. })
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<hex::FromHexError> for CodecError {
    fn from(err: hex::FromHexError) -> Self {
        Self::InvalidValue(format!("bad hex: {err}"))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_is_malformed_input() {
        assert!(CodecError::truncated(4, 1).is_malformed_input());
        assert!(CodecError::MalformedInput("x".into()).is_malformed_input());
        assert!(!CodecError::InvalidLength("x".into()).is_malformed_input());
    }

    #[test]
    fn type_mismatch_is_invalid_value() {
        let err = CodecError::TypeMismatch {
            field: "Fee".into(),
            expected: "Amount".into(),
            found: "UInt32".into(),
        };
        assert!(err.is_invalid_value());
        assert_eq!(
            err.to_string(),
            "type mismatch for field Fee: expected Amount, found UInt32"
        );
    }

    #[test]
    fn hex_errors_become_invalid_values() {
        let err: CodecError = hex::decode("zz").unwrap_err().into();
        assert!(err.is_invalid_value());
    }
}
