//! Row/column normalization
//!
//! Raw input arrives as positional rows, keyed rows, or cells scraped from
//! existing table markup. Normalization assigns column indices and fallback
//! fields, checks the schema, and turns every raw row into a stored
//! [`Record`]. Canonical [`Row`](crate::model::Row)s with defaults applied
//! are built from records on read.

mod columns;
mod json;
mod rows;
mod scrape;

pub use columns::*;
pub use rows::*;
pub use scrape::*;

pub(crate) use json::json_type;
pub(crate) use rows::parse_number;

use serde_json::Value as Json;

use crate::error::ConfigError;
use crate::model::{Column, Record};

/// Columns and rows as handed to a table.
#[derive(Debug, Clone, Default)]
pub struct TableData {
    pub columns: Vec<Column>,
    pub rows: Vec<RawRow>,
}

/// Normalized table data: indexed columns and stored records, in input
/// order.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub columns: Vec<Column>,
    pub records: Vec<Record>,
}

impl TableData {
    pub fn new(columns: Vec<Column>, rows: Vec<RawRow>) -> Self {
        Self { columns, rows }
    }

    /// Keyed rows.
    pub fn from_records(columns: Vec<Column>, records: Vec<Record>) -> Self {
        Self::new(columns, records.into_iter().map(RawRow::Record).collect())
    }

    /// Read `{"columns": [...], "rows": [...]}`. Both keys are optional.
    pub fn from_json(value: &Json) -> Result<Self, ConfigError> {
        let Json::Object(map) = value else {
            return Err(ConfigError::Json(format!(
                "table data must be an object, got {}",
                json_type(value)
            )));
        };

        let columns = match map.get("columns") {
            Some(columns) => columns_from_json(columns)?,
            None => Vec::new(),
        };
        let rows = match map.get("rows") {
            Some(rows) => rows_from_json(rows)?,
            None => Vec::new(),
        };

        Ok(Self { columns, rows })
    }

    /// Parse JSON text, see [`TableData::from_json`].
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Json = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Put scraped columns and rows in front of the configured ones.
    pub fn with_scraped(mut self, scraped: &ScrapedTable) -> Result<Self, ConfigError> {
        if scraped.is_empty() {
            return Ok(self);
        }
        let mut columns = scraped.columns()?;
        columns.append(&mut self.columns);
        let mut rows = scraped.raw_rows();
        rows.append(&mut self.rows);
        Ok(Self { columns, rows })
    }

    /// Check the schema and convert every row.
    pub fn normalize(self) -> Result<Normalized, ConfigError> {
        let columns = normalize_columns(self.columns)?;
        let records = self
            .rows
            .into_iter()
            .enumerate()
            .map(|(index, raw)| to_record(index, raw, &columns))
            .collect();

        Ok(Normalized { columns, records })
    }
}
