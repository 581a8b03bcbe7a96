//! Validated record output

use modelcard_value::{Map, Value};
use serde::{Serialize, Serializer};

/// The immutable, validated output of a schema validation pass.
///
/// A record is constructed only by a successful validation (or by the merge
/// resolver combining two of them) and is never mutated in place; merges
/// produce fresh records.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Map,
}

impl Record {
    pub(crate) fn from_parts(type_name: String, fields: Map) -> Self {
        Self { type_name, fields }
    }

    /// The record type name of the schema that produced this record
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Look up a field value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Look up a string field
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Look up a boolean field
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Look up an integer field
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Look up a numeric field (integers widen)
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Look up a nested value by dot-joined path (e.g. `cost.input`)
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        match path.split_once('.') {
            Some((head, rest)) => self.get(head)?.get_path(rest),
            None => self.get(path),
        }
    }

    /// Names of the fields present in this record
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Whether the field is present in the output
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of fields present
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert to a plain value mapping (for persistence or as merge input)
    pub fn to_value(&self) -> Value {
        Value::Map(self.fields.clone())
    }

    pub(crate) fn fields(&self) -> &Map {
        &self.fields
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
