//! Tables read from existing markup

use std::collections::HashMap;

use serde_json::Map;
use serde_json::Value as Json;

use super::columns::column_from_json;
use super::json::attribute_value;
use super::rows::RawRow;
use crate::error::ConfigError;
use crate::model::{Column, Value};

/// A header cell: its text and its data attributes, keyed by the option
/// name they configure (`field`, `sort`, `width`, `inputType`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedHeader {
    pub label: String,
    pub attributes: HashMap<String, String>,
}

impl ScrapedHeader {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            attributes: HashMap::new(),
        }
    }

    /// Add a data attribute (builder pattern).
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Header and body cells of a table that already exists in the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedTable {
    pub headers: Vec<ScrapedHeader>,
    /// Body cells as text, one vector per row
    pub rows: Vec<Vec<String>>,
}

impl ScrapedTable {
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Column definitions read from the header cells.
    ///
    /// Attribute text is read like markup data attributes, so `"false"`
    /// is a boolean and `"120"` a number.
    pub fn columns(&self) -> Result<Vec<Column>, ConfigError> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let mut map: Map<String, Json> = header
                    .attributes
                    .iter()
                    .map(|(name, text)| (name.clone(), attribute_value(text)))
                    .collect();
                map.insert("label".into(), Json::String(header.label.clone()));
                column_from_json(index, &Json::Object(map))
            })
            .collect()
    }

    /// Body cells as positional rows.
    pub fn raw_rows(&self) -> Vec<RawRow> {
        self.rows
            .iter()
            .map(|cells| RawRow::Cells(cells.iter().map(|c| Value::from(c.as_str())).collect()))
            .collect()
    }
}
