//! Stored rows

use std::collections::HashMap;

use serde::Serialize;

use super::Record;
use super::Value;

/// Numeric row identifier.
pub type RowId = i64;

/// Name of the field every row carries its identifier in.
pub const ID_FIELD: &str = "id";

/// A row held by the table's store.
///
/// The identifier is mirrored into the field map under [`ID_FIELD`] so that
/// templates and filters can read it like any other column. It never changes
/// after the row is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    id: RowId,
    fields: HashMap<String, Value>,
}

impl Row {
    /// Creates a row from a record, stamping `id` into its fields.
    pub fn new(id: RowId, record: Record) -> Self {
        let mut fields = record.fields().clone();
        fields.insert(ID_FIELD.to_string(), Value::Int(id));
        Self { id, fields }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Stringified field value; missing fields read as empty.
    pub fn text(&self, field: &str) -> String {
        self.fields.get(field).map(Value::to_text).unwrap_or_default()
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Shallow merge: fields in `patch` overwrite, others are kept.
    /// The identifier field is never overwritten.
    pub fn merge(&mut self, patch: &Record) {
        for (field, value) in patch.iter() {
            if field == ID_FIELD {
                continue;
            }
            self.fields.insert(field.clone(), value.clone());
        }
    }
}

impl Serialize for Row {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
