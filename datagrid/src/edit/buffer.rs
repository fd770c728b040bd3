//! Working copy of the row being edited

use crate::model::{Column, InputType, Record, Value};
use crate::normalize::parse_number;

/// The row a draft belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// A stored row, by `row_index`
    Existing(usize),
    /// A row that does not exist until the draft is committed
    New,
}

/// Draft of one row plus the record it started from.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    target: EditTarget,
    original: Record,
    draft: Record,
}

impl EditBuffer {
    /// Start editing a stored row.
    pub fn existing(row_index: usize, record: Record) -> Self {
        Self {
            target: EditTarget::Existing(row_index),
            original: record.clone(),
            draft: record,
        }
    }

    /// Start a draft for a new row.
    pub fn new_row(record: Record) -> Self {
        Self {
            target: EditTarget::New,
            original: record.clone(),
            draft: record,
        }
    }

    pub fn target(&self) -> EditTarget {
        self.target
    }

    /// Row index being edited, `None` for a new row.
    pub fn row_index(&self) -> Option<usize> {
        match self.target {
            EditTarget::Existing(row_index) => Some(row_index),
            EditTarget::New => None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.target == EditTarget::New
    }

    pub fn original(&self) -> &Record {
        &self.original
    }

    pub fn draft(&self) -> &Record {
        &self.draft
    }

    pub fn into_draft(self) -> Record {
        self.draft
    }

    /// Whether the draft differs from the record it started from.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.original
    }

    /// Write a coerced value into the draft.
    ///
    /// Returns `false` and leaves the draft alone when the column is read
    /// only.
    pub fn update_field(&mut self, column: &Column, raw: impl Into<Value>) -> bool {
        if !column.editable {
            log::debug!("ignoring edit of read-only field '{}'", column.field);
            return false;
        }
        let value = coerce(column.input_type, raw.into());
        self.draft.insert(column.field.clone(), value);
        true
    }
}

/// Convert an editor value to the type of its column.
///
/// - checkbox: `true`, `on`, `yes`, `1` and `checked` (any case) are true,
///   everything else false
/// - number: integer when integral, float otherwise; the empty string is
///   null and text that does not parse is kept as text
/// - other inputs pass through
///
/// ```
/// use datagrid::edit::coerce;
/// use datagrid::model::{InputType, Value};
///
/// assert_eq!(coerce(InputType::Checkbox, Value::from("on")), Value::Bool(true));
/// assert_eq!(coerce(InputType::Number, Value::from("42")), Value::Int(42));
/// assert_eq!(coerce(InputType::Number, Value::from("4.5")), Value::Float(4.5));
/// assert_eq!(coerce(InputType::Text, Value::from("42")), Value::from("42"));
/// ```
pub fn coerce(input_type: InputType, raw: Value) -> Value {
    match input_type {
        InputType::Checkbox => Value::Bool(is_truthy(&raw)),
        InputType::Number => match raw {
            Value::String(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Value::Null
                } else {
                    parse_number(trimmed).unwrap_or(Value::String(text))
                }
            }
            Value::Bool(b) => Value::Int(i64::from(b)),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Value::Int(f as i64)
            }
            other => other,
        },
        _ => raw,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0 && !f.is_nan(),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "yes" | "1" | "checked"
        ),
        Value::Null => false,
    }
}
