//! Column schema normalization

use std::collections::HashMap;

use serde_json::Map;
use serde_json::Value as Json;

use super::json::json_type;
use crate::error::ConfigError;
use crate::model::{Column, Fixed, InputType};

/// Assign `column_index` and fallback fields, and reject duplicate fields.
pub fn normalize_columns(mut columns: Vec<Column>) -> Result<Vec<Column>, ConfigError> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (index, column) in columns.iter_mut().enumerate() {
        column.column_index = index;
        if column.field.is_empty() {
            column.field = format!("field_{}", index);
        }
        if column.label.is_empty() {
            column.label = column.field.clone();
        }
        if column.input_type == InputType::Select && column.options.is_empty() {
            log::debug!("select column '{}' has no options", column.field);
        }
        if let Some(first) = seen.insert(column.field.clone(), index) {
            return Err(ConfigError::DuplicateField {
                field: column.field.clone(),
                first,
                second: index,
            });
        }
    }

    Ok(columns)
}

/// Read a column list: each entry is a label string or a column object.
pub fn columns_from_json(value: &Json) -> Result<Vec<Column>, ConfigError> {
    let Json::Array(entries) = value else {
        return Err(ConfigError::NotAnArray {
            section: "columns",
            found: json_type(value),
        });
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| column_from_json(index, entry))
        .collect()
}

/// Read one column definition.
///
/// A bare string becomes the label and leaves the field empty, so
/// [`normalize_columns`] names it `field_<index>`.
pub fn column_from_json(index: usize, value: &Json) -> Result<Column, ConfigError> {
    match value {
        Json::String(label) => Ok(Column::new("").label(label.as_str())),
        Json::Object(map) => column_from_object(index, map),
        other => Err(ConfigError::column(
            index,
            format!("expected a string or an object, got {}", json_type(other)),
        )),
    }
}

fn column_from_object(index: usize, map: &Map<String, Json>) -> Result<Column, ConfigError> {
    let mut column = Column::new("");
    column.label = String::new();

    for (key, value) in map {
        match key.as_str() {
            "field" => column.field = string_key(index, key, value)?,
            "label" => column.label = string_key(index, key, value)?,
            "sort" => column.sortable = bool_key(index, key, value)?,
            "editable" => column.editable = bool_key(index, key, value)?,
            "required" => column.required = bool_key(index, key, value)?,
            "fixed" => column.fixed = fixed_key(index, value)?,
            "width" => column.width = width_key(index, value)?,
            "inputType" => {
                let name = string_key(index, key, value)?;
                column.input_type = InputType::parse(&name).ok_or_else(|| {
                    ConfigError::column(index, format!("unknown inputType '{}'", name))
                })?;
            }
            "options" => column.options = options_key(index, value)?,
            "defaultValue" => column.default_value = default_key(index, value)?,
            "columnIndex" | "format" => {}
            other => log::trace!("column {}: ignoring key '{}'", index, other),
        }
    }

    Ok(column)
}

fn string_key(index: usize, key: &str, value: &Json) -> Result<String, ConfigError> {
    match value {
        Json::String(s) => Ok(s.clone()),
        Json::Number(n) => Ok(n.to_string()),
        other => Err(wrong_type(index, key, "a string", other)),
    }
}

fn bool_key(index: usize, key: &str, value: &Json) -> Result<bool, ConfigError> {
    match value {
        Json::Bool(b) => Ok(*b),
        other => Err(wrong_type(index, key, "a boolean", other)),
    }
}

fn fixed_key(index: usize, value: &Json) -> Result<Fixed, ConfigError> {
    match value {
        Json::Null | Json::Bool(false) => Ok(Fixed::None),
        Json::Bool(true) => Ok(Fixed::Left),
        Json::String(side) => match side.as_str() {
            "left" => Ok(Fixed::Left),
            "right" => Ok(Fixed::Right),
            other => Err(ConfigError::column(
                index,
                format!("fixed must be 'left' or 'right', got '{}'", other),
            )),
        },
        other => Err(wrong_type(index, "fixed", "a boolean or a side", other)),
    }
}

fn width_key(index: usize, value: &Json) -> Result<Option<u32>, ConfigError> {
    match value {
        Json::Null => Ok(None),
        Json::Number(n) => n
            .as_u64()
            .and_then(|w| u32::try_from(w).ok())
            .map(Some)
            .ok_or_else(|| ConfigError::column(index, format!("width {} is not a pixel count", n))),
        other => Err(wrong_type(index, "width", "a number", other)),
    }
}

/// Choices come as an array, or as a JSON array written into a string.
fn options_key(index: usize, value: &Json) -> Result<Vec<String>, ConfigError> {
    match value {
        Json::Null => Ok(Vec::new()),
        Json::Array(items) => Ok(items.iter().map(choice_text).collect()),
        Json::String(text) => {
            let parsed: Json = serde_json::from_str(&text.replace('\'', "\"")).map_err(|e| {
                ConfigError::column(index, format!("options are not a list: {}", e))
            })?;
            options_key(index, &parsed)
        }
        other => Err(wrong_type(index, "options", "an array", other)),
    }
}

fn choice_text(item: &Json) -> String {
    match item {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn default_key(index: usize, value: &Json) -> Result<Option<String>, ConfigError> {
    match value {
        Json::Null => Ok(None),
        Json::String(s) => Ok(Some(s.clone())),
        Json::Number(n) => Ok(Some(n.to_string())),
        Json::Bool(b) => Ok(Some(b.to_string())),
        other => Err(wrong_type(index, "defaultValue", "a scalar", other)),
    }
}

fn wrong_type(index: usize, key: &str, expected: &str, found: &Json) -> ConfigError {
    ConfigError::column(
        index,
        format!("'{}' must be {}, got {}", key, expected, json_type(found)),
    )
}
