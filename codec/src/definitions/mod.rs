//! # Field and Type Registries
//!
//! The codec is data-driven: which fields exist, what type each one has and
//! whether it takes part in signing all come from a schema table, not from
//! code. The default table is embedded at compile time and parsed once; other
//! schema versions can be loaded explicitly and passed to the serializer.
//!
//! ```text
//! definitions.json
//!   TYPES               name -> type code
//!   FIELDS              [name, {nth, type, isVLEncoded, isSerialized, isSigningField}]
//!   TRANSACTION_TYPES   name -> UInt16 code
//!   LEDGER_ENTRY_TYPES  name -> UInt16 code
//!   TRANSACTION_RESULTS name -> UInt8 code
//! ```
//!
//! Records live in flat vectors and are addressed by [`FieldIndex`] /
//! [`TypeIndex`]; the name and field-ID maps only store indices.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use tracing::debug;

use crate::binary::FieldId;
use crate::error::{CodecError, Result};
use crate::types::TypeKind;

/// The schema shipped with the crate.
pub const DEFAULT_DEFINITIONS: &str = include_str!("definitions.json");

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Position of a type in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeIndex(usize);

/// Position of a field in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldIndex(usize);

/// A named wire type and the codec bound to it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub code: i32,
    /// `None` for schema-only types (`Transaction`, `Unknown`, ...).
    pub kind: Option<TypeKind>,
}

/// One row of the field table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub type_index: TypeIndex,
    pub type_name: String,
    pub type_code: i32,
    pub field_code: i32,
    pub is_variable_length: bool,
    pub is_serialized: bool,
    pub is_signing_field: bool,
    /// Wire identifier; present exactly when the field is serialized.
    pub field_id: Option<FieldId>,
}

impl FieldDefinition {
    /// Canonical sort key inside an object.
    pub fn ordering_key(&self) -> (i32, i32) {
        (self.type_code, self.field_code)
    }
}

/// A name <-> code table for one of the schema's enumerations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumTable {
    by_name: HashMap<String, i32>,
    by_code: BTreeMap<i32, String>,
}

impl EnumTable {
    fn build(table: &str, entries: BTreeMap<String, i32>) -> Result<Self> {
        let mut out = Self::default();
        for (name, code) in entries {
            if let Some(existing) = out.by_code.insert(code, name.clone()) {
                return Err(CodecError::InvalidSchema(format!(
                    "{table}: {name} and {existing} share code {code}"
                )));
            }
            out.by_name.insert(name, code);
        }
        Ok(out)
    }

    pub fn code(&self, name: &str) -> Option<i32> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, code: i32) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Raw schema
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawDefinitions {
    #[serde(rename = "TYPES")]
    types: BTreeMap<String, i32>,
    #[serde(rename = "FIELDS")]
    fields: Vec<(String, RawFieldInfo)>,
    #[serde(rename = "TRANSACTION_TYPES", default)]
    transaction_types: BTreeMap<String, i32>,
    #[serde(rename = "LEDGER_ENTRY_TYPES", default)]
    ledger_entry_types: BTreeMap<String, i32>,
    #[serde(rename = "TRANSACTION_RESULTS", default)]
    transaction_results: BTreeMap<String, i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldInfo {
    nth: i32,
    #[serde(rename = "isVLEncoded")]
    is_vl_encoded: bool,
    is_serialized: bool,
    is_signing_field: bool,
    #[serde(rename = "type")]
    type_name: String,
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// The loaded type and field registries plus the enum tables.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Clone)]
pub struct Definitions {
    types: Vec<TypeDescriptor>,
    type_by_name: HashMap<String, TypeIndex>,
    fields: Vec<FieldDefinition>,
    field_by_name: HashMap<String, FieldIndex>,
    field_by_id: HashMap<FieldId, FieldIndex>,
    transaction_types: EnumTable,
    ledger_entry_types: EnumTable,
    transaction_results: EnumTable,
}

impl Definitions {
    /// The process-wide registry built from [`DEFAULT_DEFINITIONS`], parsed
    /// on first use. A parse failure is cached and returned on every call.
    pub fn try_global() -> Result<&'static Definitions> {
        static GLOBAL: OnceLock<Result<Definitions>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Definitions::from_json_str(DEFAULT_DEFINITIONS))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Infallible form of [`Definitions::try_global`].
    ///
    /// # Panics
    ///
    /// Panics if the embedded `definitions.json` does not parse. The file is
    /// compiled in and checked by this module's tests, so a panic here means
    /// a broken build rather than bad input.
    pub fn global() -> &'static Definitions {
        match Self::try_global() {
            Ok(defs) => defs,
            Err(err) => panic!("embedded definitions.json is invalid: {err}"),
        }
    }

    /// Reads a schema file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            CodecError::InvalidSchema(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Parses and validates a schema document.
    ///
    /// # Errors
    ///
    /// - [`CodecError::Json`] if the document is not shaped like a schema.
    /// - [`CodecError::MissingType`] if a field names a type absent from `TYPES`.
    /// - [`CodecError::InvalidSchema`] for duplicate names, duplicate wire
    ///   identifiers, or codes that do not fit in a field ID.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawDefinitions = serde_json::from_str(json)?;

        let mut types = Vec::with_capacity(raw.types.len());
        let mut type_by_name = HashMap::with_capacity(raw.types.len());
        for (name, code) in raw.types {
            type_by_name.insert(name.clone(), TypeIndex(types.len()));
            types.push(TypeDescriptor {
                kind: TypeKind::from_schema_name(&name),
                name,
                code,
            });
        }

        let mut fields = Vec::with_capacity(raw.fields.len());
        let mut field_by_name = HashMap::with_capacity(raw.fields.len());
        let mut field_by_id = HashMap::new();
        for (name, info) in raw.fields {
            let type_index = *type_by_name.get(&info.type_name).ok_or_else(|| {
                CodecError::MissingType(format!(
                    "field {name} references unregistered type {}",
                    info.type_name
                ))
            })?;
            let type_code = types[type_index.0].code;

            let field_id = if info.is_serialized {
                let id = wire_id(&name, type_code, info.nth)?;
                let index = FieldIndex(fields.len());
                if let Some(FieldIndex(other)) = field_by_id.insert(id, index) {
                    let other: &FieldDefinition = &fields[other];
                    return Err(CodecError::InvalidSchema(format!(
                        "fields {} and {name} share wire id {id}",
                        other.name
                    )));
                }
                Some(id)
            } else {
                None
            };

            if field_by_name
                .insert(name.clone(), FieldIndex(fields.len()))
                .is_some()
            {
                return Err(CodecError::InvalidSchema(format!("duplicate field {name}")));
            }

            fields.push(FieldDefinition {
                name,
                type_index,
                type_name: info.type_name,
                type_code,
                field_code: info.nth,
                is_variable_length: info.is_vl_encoded,
                is_serialized: info.is_serialized,
                is_signing_field: info.is_signing_field,
                field_id,
            });
        }

        let defs = Self {
            types,
            type_by_name,
            fields,
            field_by_name,
            field_by_id,
            transaction_types: EnumTable::build("TRANSACTION_TYPES", raw.transaction_types)?,
            ledger_entry_types: EnumTable::build("LEDGER_ENTRY_TYPES", raw.ledger_entry_types)?,
            transaction_results: EnumTable::build("TRANSACTION_RESULTS", raw.transaction_results)?,
        };

        debug!(
            types = defs.types.len(),
            fields = defs.fields.len(),
            serialized = defs.field_by_id.len(),
            transaction_types = defs.transaction_types.len(),
            "loaded field definitions"
        );
        Ok(defs)
    }

    // -- lookups ------------------------------------------------------------

    /// Looks a field up by name.
    pub fn field(&self, name: &str) -> Result<&FieldDefinition> {
        self.index_of(name).map(|index| self.field_at(index))
    }

    /// Registry index of the field called `name`.
    pub fn index_of(&self, name: &str) -> Result<FieldIndex> {
        self.field_by_name
            .get(name)
            .copied()
            .ok_or_else(|| CodecError::UnknownField(name.to_string()))
    }

    /// The field at an index handed out by this registry.
    pub fn field_at(&self, index: FieldIndex) -> &FieldDefinition {
        &self.fields[index.0]
    }

    /// Looks a serialized field up by its wire identifier.
    pub fn field_by_id(&self, id: FieldId) -> Result<&FieldDefinition> {
        self.field_by_id
            .get(&id)
            .map(|&index| self.field_at(index))
            .ok_or_else(|| CodecError::UnknownField(format!("no field with id {id}")))
    }

    /// The type at an index handed out by this registry.
    pub fn type_at(&self, index: TypeIndex) -> &TypeDescriptor {
        &self.types[index.0]
    }

    /// Looks a type up by its schema name.
    pub fn type_by_name(&self, name: &str) -> Option<&TypeDescriptor> {
        self.type_by_name.get(name).map(|&index| self.type_at(index))
    }

    /// The codec a field's values use.
    pub fn kind_of(&self, field: &FieldDefinition) -> Result<TypeKind> {
        self.type_at(field.type_index).kind.ok_or_else(|| {
            CodecError::MissingType(format!(
                "type {} of field {} has no codec",
                field.type_name, field.name
            ))
        })
    }

    /// Wire identifier bytes of a field.
    pub fn field_id_bytes(&self, field: &FieldDefinition) -> Result<Vec<u8>> {
        field
            .field_id
            .map(|id| id.encode())
            .ok_or_else(|| not_serialized(field))
    }

    /// Parses a field identifier from the front of `bytes` and resolves it.
    pub fn parse_field_id(&self, bytes: &[u8]) -> Result<(&FieldDefinition, usize)> {
        let (id, consumed) = FieldId::decode(bytes)?;
        Ok((self.field_by_id(id)?, consumed))
    }

    /// Every field in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    /// Number of fields, serialized or not.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Every type in schema order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter()
    }

    // -- enum tables --------------------------------------------------------

    /// `TRANSACTION_TYPES`: names such as `Payment` to their codes.
    pub fn transaction_types(&self) -> &EnumTable {
        &self.transaction_types
    }

    /// `LEDGER_ENTRY_TYPES` name/code table.
    pub fn ledger_entry_types(&self) -> &EnumTable {
        &self.ledger_entry_types
    }

    /// `TRANSACTION_RESULTS` name/code table.
    pub fn transaction_results(&self) -> &EnumTable {
        &self.transaction_results
    }
}

fn wire_id(name: &str, type_code: i32, field_code: i32) -> Result<FieldId> {
    let in_range = |code: i32| (1..=255).contains(&code);
    if !in_range(type_code) || !in_range(field_code) {
        return Err(CodecError::InvalidSchema(format!(
            "serialized field {name} has codes ({type_code}, {field_code}) outside 1..=255"
        )));
    }
    FieldId::new(type_code as u8, field_code as u8)
}

pub(crate) fn not_serialized(field: &FieldDefinition) -> CodecError {
    CodecError::InvalidValue(format!("field {} is never serialized", field.name))
}
