//! Nested objects and arrays.
//!
//! These are plain containers. Their encoding depends on the field registry
//! (every member is a named field) and lives in [`crate::serializer`].

use std::collections::BTreeMap;

use super::FieldValue;

/// A set of named fields.
///
/// Iteration order is by name; canonical wire order is decided by the
/// serializer from the field definitions, never by insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StObject {
    fields: BTreeMap<String, FieldValue>,
}

impl StObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.fields.insert(name.into(), value.into())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.fields.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for StObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// One array element: an object wrapped in a named field (`Memo`, `Signer`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayMember {
    pub name: String,
    pub object: StObject,
}

impl ArrayMember {
    pub fn new(name: impl Into<String>, object: StObject) -> Self {
        Self {
            name: name.into(),
            object,
        }
    }
}

/// An ordered array of wrapped objects. Order is preserved on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StArray(pub Vec<ArrayMember>);

impl StArray {
    pub fn new(members: Vec<ArrayMember>) -> Self {
        Self(members)
    }

    pub fn members(&self) -> &[ArrayMember] {
        &self.0
    }

    pub fn push(&mut self, member: ArrayMember) {
        self.0.push(member);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
