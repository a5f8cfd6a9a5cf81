//! # Object Serializer
//!
//! Turns an [`StObject`] into canonical bytes and back.
//!
//! ```text
//! object  = field*                    sorted by (type code, field code)
//! field   = field-id [vl-length] value
//! nested  = field* 0xE1               STObject values
//! array   = (member-id object 0xE1)* 0xF1
//! ```
//!
//! Sorting is the only canonicalization step: the order fields were inserted
//! in never reaches the wire. Decoding is the strict mirror of encoding and
//! rejects anything encoding could not have produced (out-of-order or repeated
//! fields, stray sentinels, trailing bytes inside a length-bounded field).
//! Both directions stop at [`MAX_NESTING_DEPTH`] levels of objects and arrays.

use tracing::trace;

use crate::binary::{BinaryParser, BinarySerializer, FieldId};
use crate::config::{
    ARRAY_END_MARKER, ARRAY_END_MARKER_NAME, MAX_NESTING_DEPTH, OBJECT_END_MARKER,
    OBJECT_END_MARKER_NAME,
};
use crate::definitions::{Definitions, FieldDefinition};
use crate::error::{CodecError, Result};
use crate::types::{
    AccountId, Amount, ArrayMember, Blob, FieldValue, Hash128, Hash160, Hash256, PathSet,
    StArray, StObject, TypeKind, Vector256, WireType,
};

/// Which fields of the top-level object are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldFilter {
    /// Every serialized field.
    #[default]
    All,
    /// Only fields flagged `isSigningField`. Nested objects are written whole.
    SigningOnly,
}

impl FieldFilter {
    fn includes(self, field: &FieldDefinition) -> bool {
        field.is_serialized && (self == Self::All || field.is_signing_field)
    }
}

/// A field resolved against the registry and encoded, ready to be sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedField<'d> {
    pub definition: &'d FieldDefinition,
    pub id: FieldId,
    /// VL prefix (when the field has one) followed by the value bytes.
    pub bytes: Vec<u8>,
}

/// Serializes every serialized field of `object`.
pub fn serialize_object(object: &StObject, defs: &Definitions) -> Result<Vec<u8>> {
    serialize_object_with(object, defs, FieldFilter::All)
}

/// Serializes the fields of `object` selected by `filter`, in canonical order.
pub fn serialize_object_with(
    object: &StObject,
    defs: &Definitions,
    filter: FieldFilter,
) -> Result<Vec<u8>> {
    let mut out = BinarySerializer::new();
    write_fields(object, defs, filter, 0, &mut out)?;
    trace!(fields = object.len(), bytes = out.len(), ?filter, "serialized object");
    Ok(out.into_bytes())
}

/// Resolves and encodes the fields of `object` selected by `filter`, sorted
/// into wire order.
pub fn serialize_fields<'d>(
    object: &StObject,
    defs: &'d Definitions,
    filter: FieldFilter,
) -> Result<Vec<SerializedField<'d>>> {
    fields_at_depth(object, defs, filter, 0)
}

/// Depth of the level below `depth`, or an error once it passes the limit.
fn descend(depth: usize, error: fn(String) -> CodecError) -> Result<usize> {
    let next = depth + 1;
    if next > MAX_NESTING_DEPTH {
        return Err(error(format!("nesting deeper than {MAX_NESTING_DEPTH} levels")));
    }
    Ok(next)
}

fn fields_at_depth<'d>(
    object: &StObject,
    defs: &'d Definitions,
    filter: FieldFilter,
    depth: usize,
) -> Result<Vec<SerializedField<'d>>> {
    let mut fields = Vec::with_capacity(object.len());
    for (name, value) in object.iter() {
        let definition = defs.field(name)?;
        if !filter.includes(definition) {
            continue;
        }
        if name == OBJECT_END_MARKER_NAME || name == ARRAY_END_MARKER_NAME {
            return Err(CodecError::InvalidValue(format!(
                "{name} is a sentinel, not a settable field"
            )));
        }
        let id = definition
            .field_id
            .ok_or_else(|| crate::definitions::not_serialized(definition))?;

        let mut payload = Vec::new();
        write_value(definition, value, defs, depth, &mut payload)?;

        let bytes = if definition.is_variable_length {
            let mut prefixed = BinarySerializer::with_capacity(payload.len() + 3);
            prefixed.write_length_prefixed(&payload)?;
            prefixed.into_bytes()
        } else {
            payload
        };
        fields.push(SerializedField {
            definition,
            id,
            bytes,
        });
    }
    fields.sort_by_key(|field| field.id);
    Ok(fields)
}

fn write_fields(
    object: &StObject,
    defs: &Definitions,
    filter: FieldFilter,
    depth: usize,
    out: &mut BinarySerializer,
) -> Result<()> {
    for field in fields_at_depth(object, defs, filter, depth)? {
        out.write_field_id(field.id);
        out.put(&field.bytes);
    }
    Ok(())
}

fn write_value(
    field: &FieldDefinition,
    value: &FieldValue,
    defs: &Definitions,
    depth: usize,
    out: &mut Vec<u8>,
) -> Result<()> {
    let kind = defs.kind_of(field)?;
    match (kind, value) {
        (TypeKind::UInt8, FieldValue::UInt8(v)) => v.write_to(out),
        (TypeKind::UInt16, FieldValue::UInt16(v)) => v.write_to(out),
        (TypeKind::UInt32, FieldValue::UInt32(v)) => v.write_to(out),
        (TypeKind::UInt64, FieldValue::UInt64(v)) => v.write_to(out),
        (TypeKind::Hash128, FieldValue::Hash128(v)) => v.write_to(out),
        (TypeKind::Hash160, FieldValue::Hash160(v)) => v.write_to(out),
        (TypeKind::Hash256, FieldValue::Hash256(v)) => v.write_to(out),
        (TypeKind::Amount, FieldValue::Amount(v)) => v.write_to(out),
        (TypeKind::Blob, FieldValue::Blob(v)) => v.write_to(out),
        (TypeKind::AccountId, FieldValue::AccountId(v)) => v.write_to(out),
        (TypeKind::PathSet, FieldValue::PathSet(v)) => v.write_to(out),
        (TypeKind::Vector256, FieldValue::Vector256(v)) => v.write_to(out),
        (TypeKind::StObject, FieldValue::Object(inner)) => {
            let depth = descend(depth, CodecError::InvalidValue)?;
            let mut nested = BinarySerializer::new();
            write_fields(inner, defs, FieldFilter::All, depth, &mut nested)?;
            nested.put_u8(OBJECT_END_MARKER);
            out.extend_from_slice(nested.as_bytes());
            Ok(())
        }
        (TypeKind::StArray, FieldValue::Array(array)) => write_array(array, defs, depth, out),
        (expected, found) => Err(CodecError::TypeMismatch {
            field: field.name.clone(),
            expected: expected.schema_name().to_string(),
            found: found.kind().schema_name().to_string(),
        }),
    }
}

fn write_array(
    array: &StArray,
    defs: &Definitions,
    depth: usize,
    out: &mut Vec<u8>,
) -> Result<()> {
    let depth = descend(depth, CodecError::InvalidValue)?;
    let mut nested = BinarySerializer::new();
    for member in array.members() {
        let definition = defs.field(&member.name)?;
        let id = member_id(definition, defs)?;
        nested.write_field_id(id);
        let member_depth = descend(depth, CodecError::InvalidValue)?;
        write_fields(&member.object, defs, FieldFilter::All, member_depth, &mut nested)?;
        nested.put_u8(OBJECT_END_MARKER);
    }
    nested.put_u8(ARRAY_END_MARKER);
    out.extend_from_slice(nested.as_bytes());
    Ok(())
}

/// Array members must be serialized STObject fields.
fn member_id(definition: &FieldDefinition, defs: &Definitions) -> Result<FieldId> {
    let kind = defs.kind_of(definition)?;
    match definition.field_id {
        Some(id) if kind == TypeKind::StObject && definition.name != OBJECT_END_MARKER_NAME => {
            Ok(id)
        }
        _ => Err(CodecError::TypeMismatch {
            field: definition.name.clone(),
            expected: TypeKind::StObject.schema_name().to_string(),
            found: definition.type_name.clone(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// Parses a complete top-level object. Every byte of `bytes` must belong to it.
pub fn deserialize_object(bytes: &[u8], defs: &Definitions) -> Result<StObject> {
    let mut parser = BinaryParser::new(bytes);
    let object = read_object(&mut parser, defs, 0)?;
    trace!(fields = object.len(), bytes = bytes.len(), "deserialized object");
    Ok(object)
}

fn is_object_end(id: FieldId) -> bool {
    id.type_code == OBJECT_END_MARKER >> 4 && id.field_code == OBJECT_END_MARKER & 0x0F
}

fn is_array_end(id: FieldId) -> bool {
    id.type_code == ARRAY_END_MARKER >> 4 && id.field_code == ARRAY_END_MARKER & 0x0F
}

/// Reads fields until the end marker. Depth 0 is the top level, which ends
/// with the input instead.
fn read_object(
    parser: &mut BinaryParser<'_>,
    defs: &Definitions,
    depth: usize,
) -> Result<StObject> {
    let nested = depth > 0;
    let mut object = StObject::new();
    let mut previous: Option<FieldId> = None;
    loop {
        if parser.is_end() {
            if nested {
                return Err(CodecError::MalformedInput(
                    "nested object is missing its end marker".into(),
                ));
            }
            return Ok(object);
        }

        let offset = parser.position();
        let id = parser.read_field_id()?;
        if is_object_end(id) {
            if nested {
                return Ok(object);
            }
            return Err(CodecError::MalformedInput(format!(
                "object end marker at top level (offset {offset})"
            )));
        }
        if is_array_end(id) {
            return Err(CodecError::MalformedInput(format!(
                "array end marker inside an object (offset {offset})"
            )));
        }

        let field = defs.field_by_id(id)?;
        if let Some(prev) = previous {
            if id <= prev {
                return Err(CodecError::MalformedInput(format!(
                    "field {} at offset {offset} is out of canonical order",
                    field.name
                )));
            }
        }
        previous = Some(id);

        let value = read_field_value(parser, defs, field, depth)?;
        object.insert(field.name.clone(), value);
    }
}

fn read_field_value(
    parser: &mut BinaryParser<'_>,
    defs: &Definitions,
    field: &FieldDefinition,
    depth: usize,
) -> Result<FieldValue> {
    let kind = defs.kind_of(field)?;
    if !field.is_variable_length {
        return read_value(parser, defs, kind, None, depth);
    }

    let length = parser.read_vl_length()?;
    let mut bounded = parser.sub_parser(length)?;
    let value = read_value(&mut bounded, defs, kind, Some(length), depth)?;
    if !bounded.is_end() {
        return Err(CodecError::MalformedInput(format!(
            "{} trailing bytes inside field {}",
            bounded.remaining(),
            field.name
        )));
    }
    Ok(value)
}

fn read_value(
    parser: &mut BinaryParser<'_>,
    defs: &Definitions,
    kind: TypeKind,
    hint: Option<usize>,
    depth: usize,
) -> Result<FieldValue> {
    let value = match kind {
        TypeKind::UInt8 => FieldValue::UInt8(u8::read_from(parser, hint)?),
        TypeKind::UInt16 => FieldValue::UInt16(u16::read_from(parser, hint)?),
        TypeKind::UInt32 => FieldValue::UInt32(u32::read_from(parser, hint)?),
        TypeKind::UInt64 => FieldValue::UInt64(u64::read_from(parser, hint)?),
        TypeKind::Hash128 => FieldValue::Hash128(Hash128::read_from(parser, hint)?),
        TypeKind::Hash160 => FieldValue::Hash160(Hash160::read_from(parser, hint)?),
        TypeKind::Hash256 => FieldValue::Hash256(Hash256::read_from(parser, hint)?),
        TypeKind::Amount => FieldValue::Amount(Amount::read_from(parser, hint)?),
        TypeKind::Blob => FieldValue::Blob(Blob::read_from(parser, hint)?),
        TypeKind::AccountId => FieldValue::AccountId(AccountId::read_from(parser, hint)?),
        TypeKind::PathSet => FieldValue::PathSet(PathSet::read_from(parser, hint)?),
        TypeKind::Vector256 => FieldValue::Vector256(Vector256::read_from(parser, hint)?),
        TypeKind::StObject => {
            let depth = descend(depth, CodecError::MalformedInput)?;
            FieldValue::Object(read_object(parser, defs, depth)?)
        }
        TypeKind::StArray => {
            let depth = descend(depth, CodecError::MalformedInput)?;
            FieldValue::Array(read_array(parser, defs, depth)?)
        }
    };
    Ok(value)
}

fn read_array(
    parser: &mut BinaryParser<'_>,
    defs: &Definitions,
    depth: usize,
) -> Result<StArray> {
    let mut array = StArray::default();
    loop {
        if parser.is_end() {
            return Err(CodecError::MalformedInput(
                "array is missing its end marker".into(),
            ));
        }
        let id = parser.read_field_id()?;
        if is_array_end(id) {
            return Ok(array);
        }
        let definition = defs.field_by_id(id)?;
        member_id(definition, defs).map_err(|_| {
            CodecError::MalformedInput(format!(
                "array member {} is not an object field",
                definition.name
            ))
        })?;
        let object = read_object(parser, defs, descend(depth, CodecError::MalformedInput)?)?;
        array.push(ArrayMember::new(definition.name.clone(), object));
    }
}
