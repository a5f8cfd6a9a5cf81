//! # Wire Types
//!
//! The value model of the codec and one codec per wire type.
//!
//! ```text
//! uint.rs         UInt8 / UInt16 / UInt32 / UInt64, big-endian fixed width
//! hash.rs         Hash128 / Hash160 / Hash256, raw fixed width
//! blob.rs         arbitrary bytes, VL-prefixed by the serializer
//! account_id.rs   20-byte account identifiers
//! currency.rs     160-bit currency codes
//! amount.rs       native drops and issued amounts, 8 or 48 bytes
//! path_set.rs     payment paths with step/path/end sentinels
//! vector256.rs    VL-prefixed list of Hash256
//! object.rs       nested objects and arrays (encoded by the serializer)
//! ```
//!
//! A field's schema declares its type by name; [`TypeKind`] is the closed set
//! of type names that have a codec bound to them. Values are carried in the
//! tagged [`FieldValue`] and checked against the declared kind when they are
//! encoded, so a UInt32 never silently lands in an Amount slot.

pub mod account_id;
pub mod amount;
pub mod blob;
pub mod currency;
pub mod hash;
pub mod object;
pub mod path_set;
pub mod uint;
pub mod vector256;

use std::fmt;

pub use account_id::AccountId;
pub use amount::{Amount, IssuedAmount, IssuedValue, NativeAmount};
pub use blob::Blob;
pub use currency::Currency;
pub use hash::{Hash, Hash128, Hash160, Hash256};
pub use object::{ArrayMember, StArray, StObject};
pub use path_set::{Path, PathSet, PathStep};
pub use vector256::Vector256;

use crate::binary::BinaryParser;
use crate::error::Result;

/// Encode/decode contract shared by every self-contained wire type.
///
/// Nested objects and arrays are not `WireType`s: they need the field
/// registry and are handled by [`crate::serializer`].
pub trait WireType: Sized {
    /// Schema name of the type, used in error messages.
    const TYPE_NAME: &'static str;

    /// Appends the canonical encoding (without any VL prefix) to `out`.
    fn write_to(&self, out: &mut Vec<u8>) -> Result<()>;

    /// Reads one value. `length_hint` is the VL length when the field is
    /// VL-encoded; fixed-width types use it only to check it.
    fn read_from(parser: &mut BinaryParser<'_>, length_hint: Option<usize>) -> Result<Self>;

    /// Canonical encoding as an owned buffer.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Decodes one value from the front of `bytes`, returning it with the
    /// number of bytes consumed.
    fn from_bytes(bytes: &[u8], length_hint: Option<usize>) -> Result<(Self, usize)> {
        let mut parser = BinaryParser::new(bytes);
        let value = Self::read_from(&mut parser, length_hint)?;
        Ok((value, parser.position()))
    }
}

// ---------------------------------------------------------------------------
// TypeKind
// ---------------------------------------------------------------------------

/// Wire types that have a codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Hash128,
    Hash160,
    Hash256,
    Amount,
    Blob,
    AccountId,
    StObject,
    StArray,
    PathSet,
    Vector256,
}

impl TypeKind {
    /// Binds a schema type name to its codec. Unknown names have no codec.
    pub fn from_schema_name(name: &str) -> Option<Self> {
        let kind = match name {
            "UInt8" => Self::UInt8,
            "UInt16" => Self::UInt16,
            "UInt32" => Self::UInt32,
            "UInt64" => Self::UInt64,
            "Hash128" => Self::Hash128,
            "Hash160" => Self::Hash160,
            "Hash256" => Self::Hash256,
            "Amount" => Self::Amount,
            "Blob" => Self::Blob,
            "AccountID" => Self::AccountId,
            "STObject" => Self::StObject,
            "STArray" => Self::StArray,
            "PathSet" => Self::PathSet,
            "Vector256" => Self::Vector256,
            _ => return None,
        };
        Some(kind)
    }

    /// The schema name of this type.
    pub fn schema_name(&self) -> &'static str {
        match self {
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Hash128 => "Hash128",
            Self::Hash160 => "Hash160",
            Self::Hash256 => "Hash256",
            Self::Amount => "Amount",
            Self::Blob => "Blob",
            Self::AccountId => "AccountID",
            Self::StObject => "STObject",
            Self::StArray => "STArray",
            Self::PathSet => "PathSet",
            Self::Vector256 => "Vector256",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_name())
    }
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A field value, tagged with the wire type it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Hash128(Hash128),
    Hash160(Hash160),
    Hash256(Hash256),
    Amount(Amount),
    Blob(Blob),
    AccountId(AccountId),
    Object(StObject),
    Array(StArray),
    PathSet(PathSet),
    Vector256(Vector256),
}

impl FieldValue {
    /// The wire type this variant encodes as.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::UInt8(_) => TypeKind::UInt8,
            Self::UInt16(_) => TypeKind::UInt16,
            Self::UInt32(_) => TypeKind::UInt32,
            Self::UInt64(_) => TypeKind::UInt64,
            Self::Hash128(_) => TypeKind::Hash128,
            Self::Hash160(_) => TypeKind::Hash160,
            Self::Hash256(_) => TypeKind::Hash256,
            Self::Amount(_) => TypeKind::Amount,
            Self::Blob(_) => TypeKind::Blob,
            Self::AccountId(_) => TypeKind::AccountId,
            Self::Object(_) => TypeKind::StObject,
            Self::Array(_) => TypeKind::StArray,
            Self::PathSet(_) => TypeKind::PathSet,
            Self::Vector256(_) => TypeKind::Vector256,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Self::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_account_id(&self) -> Option<&AccountId> {
        match self {
            Self::AccountId(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&StObject> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&StArray> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_amount(&self) -> Option<&Amount> {
        match self {
            Self::Amount(a) => Some(a),
            _ => None,
        }
    }
}

macro_rules! impl_from_for_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_for_field_value! {
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    Hash128 => Hash128,
    Hash160 => Hash160,
    Hash256 => Hash256,
    Amount => Amount,
    Blob => Blob,
    AccountId => AccountId,
    StObject => Object,
    StArray => Array,
    PathSet => PathSet,
    Vector256 => Vector256,
}

impl From<NativeAmount> for FieldValue {
    fn from(value: NativeAmount) -> Self {
        Self::Amount(Amount::Native(value))
    }
}

impl From<IssuedAmount> for FieldValue {
    fn from(value: IssuedAmount) -> Self {
        Self::Amount(Amount::Issued(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_names_roundtrip() {
        let kinds = [
            TypeKind::UInt8,
            TypeKind::UInt16,
            TypeKind::UInt32,
            TypeKind::UInt64,
            TypeKind::Hash128,
            TypeKind::Hash160,
            TypeKind::Hash256,
            TypeKind::Amount,
            TypeKind::Blob,
            TypeKind::AccountId,
            TypeKind::StObject,
            TypeKind::StArray,
            TypeKind::PathSet,
            TypeKind::Vector256,
        ];
        for kind in kinds {
            assert_eq!(TypeKind::from_schema_name(kind.schema_name()), Some(kind));
        }
    }

    #[test]
    fn unbound_schema_names_have_no_codec() {
        assert_eq!(TypeKind::from_schema_name("Transaction"), None);
        assert_eq!(TypeKind::from_schema_name("NotPresent"), None);
        assert_eq!(TypeKind::from_schema_name("accountid"), None);
    }

    #[test]
    fn from_impls_pick_matching_variant() {
        assert_eq!(FieldValue::from(7u8).kind(), TypeKind::UInt8);
        assert_eq!(FieldValue::from(7u32).kind(), TypeKind::UInt32);
        assert_eq!(FieldValue::from(Blob::new(vec![1])).kind(), TypeKind::Blob);
        assert_eq!(
            FieldValue::from(NativeAmount::from_drops(10).unwrap()).kind(),
            TypeKind::Amount
        );
        assert_eq!(FieldValue::from(StObject::new()).kind(), TypeKind::StObject);
    }
}
