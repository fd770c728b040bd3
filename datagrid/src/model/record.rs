//! Stored records and canonical rows

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// A row as the caller supplied it.
///
/// Records hold field values as a `HashMap<String, Value>`. The engine
/// stores records untouched; column defaults are applied only when a
/// [`Row`] is built from a record.
///
/// # Example
///
/// ```
/// use datagrid::model::{Record, Value};
///
/// let record = Record::new()
///     .set("name", "Amy")
///     .set("age", 25);
///
/// assert_eq!(record.get("name"), Some(&Value::from("Amy")));
/// assert_eq!(record.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Copies every field of `other` over this record.
    pub fn merge(&mut self, other: &Record) {
        for (field, value) in &other.fields {
            self.fields.insert(field.clone(), value.clone());
        }
    }
}

impl From<HashMap<String, Value>> for Record {
    fn from(fields: HashMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The canonical view of a stored record.
///
/// Every schema field is present and non-blank (defaults applied). Fields
/// the schema does not know are carried along as supplied. `row_index` is
/// the record's stable identity: its position in the original input, or
/// the index handed out when the row was added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    row_index: usize,
    cells: HashMap<String, Value>,
}

impl Row {
    /// Creates a row from its index and cells.
    pub fn new(row_index: usize, cells: HashMap<String, Value>) -> Self {
        Self { row_index, cells }
    }

    /// Returns the stable row index.
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// Returns the value of a field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.cells.get(field)
    }

    /// Returns the value of a field, or `Null` when absent.
    pub fn value(&self, field: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.cells.get(field).unwrap_or(&NULL)
    }

    /// Returns all cells.
    pub fn cells(&self) -> &HashMap<String, Value> {
        &self.cells
    }

    /// Converts the row back into a plain record.
    pub fn into_record(self) -> Record {
        Record::from(self.cells)
    }
}
