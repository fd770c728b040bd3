//! Row normalization

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value as Json;

use super::json::json_type;
use crate::error::ConfigError;
use crate::model::{Column, InputType, Record, Row, Value};

/// A row as supplied: positional cells or a field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRow {
    /// Cell `i` belongs to the column with `column_index == i`.
    Cells(Vec<Value>),
    /// Cells keyed by field.
    Record(Record),
}

impl From<Vec<Value>> for RawRow {
    fn from(cells: Vec<Value>) -> Self {
        Self::Cells(cells)
    }
}

impl From<Record> for RawRow {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

/// Read a row list. Each entry must be an array or an object.
pub fn rows_from_json(value: &Json) -> Result<Vec<RawRow>, ConfigError> {
    let Json::Array(entries) = value else {
        return Err(ConfigError::NotAnArray {
            section: "rows",
            found: json_type(value),
        });
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Json::Array(cells) => Ok(RawRow::Cells(
                cells.iter().cloned().map(Value::from).collect(),
            )),
            Json::Object(map) => Ok(RawRow::Record(
                map.iter().map(|(k, v)| (k.clone(), Value::from(v.clone()))).collect(),
            )),
            other => Err(ConfigError::Row {
                index,
                found: json_type(other),
            }),
        })
        .collect()
}

/// Turn a raw row into a stored record.
///
/// Array cells are keyed by column position. Extra cells are dropped and
/// string cells of number and checkbox columns are parsed. Object rows are
/// stored as given.
pub fn to_record(row_index: usize, raw: RawRow, columns: &[Column]) -> Record {
    match raw {
        RawRow::Record(record) => record,
        RawRow::Cells(cells) => {
            if cells.len() > columns.len() {
                log::debug!(
                    "row {}: dropping {} cells beyond the schema",
                    row_index,
                    cells.len() - columns.len()
                );
            }
            columns
                .iter()
                .zip(cells)
                .map(|(column, cell)| (column.field.clone(), parse_cell(column.input_type, cell)))
                .collect()
        }
    }
}

/// Parse a text cell of a typed column. Text that does not parse is kept.
fn parse_cell(input_type: InputType, cell: Value) -> Value {
    let Value::String(text) = &cell else {
        return cell;
    };
    match input_type {
        InputType::Number => parse_number(text.trim()).unwrap_or(cell),
        InputType::Checkbox => match text.trim() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => cell,
        },
        _ => cell,
    }
}

/// Integer if the text is integral, float otherwise.
pub(crate) fn parse_number(text: &str) -> Option<Value> {
    if let Ok(i) = text.parse::<i64>() {
        return Some(Value::Int(i));
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Some(Value::Int(f as i64))
        }
        Ok(f) if f.is_finite() => Some(Value::Float(f)),
        _ => None,
    }
}

/// Build the canonical row for a stored record.
///
/// Every schema field is present and blank cells carry the column default.
/// Fields outside the schema are copied as they are.
pub fn canonical_row(
    row_index: usize,
    record: &Record,
    columns: &[Column],
    default_value: &str,
) -> Row {
    let mut cells: HashMap<String, Value> = record.fields().clone();
    for column in columns {
        let value = cells.remove(&column.field).unwrap_or_default();
        cells.insert(column.field.clone(), column.resolve(value, default_value));
    }
    Row::new(row_index, cells)
}

/// A record with every column set to its default, typed by input type.
///
/// Number columns get a parsed default (or null), checkbox columns get
/// `false` unless the default reads as `true`, the rest get the default
/// text.
pub fn empty_record(columns: &[Column], default_value: &str) -> Record {
    columns
        .iter()
        .map(|column| {
            let fallback = column.fallback(default_value);
            let value = match column.input_type {
                InputType::Number => parse_number(fallback).unwrap_or(Value::Null),
                InputType::Checkbox => Value::Bool(fallback == "true"),
                _ => Value::from(fallback),
            };
            (column.field.clone(), value)
        })
        .collect()
}
