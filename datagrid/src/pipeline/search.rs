//! Case-insensitive substring search over rows.

use crate::model::Row;

/// Which fields a search looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchColumns {
    /// Every field of the row.
    #[default]
    All,
    /// A single field.
    Field(String),
    /// Any of the listed fields.
    Fields(Vec<String>),
}

impl SearchColumns {
    /// Returns `true` if values of `field` take part in the search.
    pub fn includes(&self, field: &str) -> bool {
        match self {
            Self::All => true,
            Self::Field(f) => f == field,
            Self::Fields(fields) => fields.iter().any(|f| f == field),
        }
    }
}

/// An empty field name means every field.
impl From<&str> for SearchColumns {
    fn from(field: &str) -> Self {
        if field.is_empty() {
            Self::All
        } else {
            Self::Field(field.to_string())
        }
    }
}

impl From<String> for SearchColumns {
    fn from(field: String) -> Self {
        Self::from(field.as_str())
    }
}

impl From<Vec<String>> for SearchColumns {
    fn from(fields: Vec<String>) -> Self {
        Self::Fields(fields)
    }
}

impl From<&[&str]> for SearchColumns {
    fn from(fields: &[&str]) -> Self {
        Self::Fields(fields.iter().map(|f| f.to_string()).collect())
    }
}

impl<T: Into<SearchColumns>> From<Option<T>> for SearchColumns {
    fn from(columns: Option<T>) -> Self {
        columns.map(Into::into).unwrap_or_default()
    }
}

/// Keep the rows where any selected field contains `term`, ignoring case.
///
/// An empty term returns `rows` as given. Survivors keep their relative
/// order.
///
/// # Example
///
/// ```
/// use datagrid::model::{Row, Value};
/// use datagrid::pipeline::{SearchColumns, search};
///
/// let rows = vec![
///     Row::new(0, [("name".to_string(), Value::from("Bob"))].into()),
///     Row::new(1, [("name".to_string(), Value::from("Amy"))].into()),
/// ];
/// let found = search(rows.iter().collect(), "BO", &SearchColumns::All);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].row_index(), 0);
/// ```
pub fn search<'a>(rows: Vec<&'a Row>, term: &str, columns: &SearchColumns) -> Vec<&'a Row> {
    if term.is_empty() {
        return rows;
    }

    let needle = term.to_lowercase();
    rows.into_iter()
        .filter(|row| row_matches(row, &needle, columns))
        .collect()
}

/// Whether a row matches an already lowercased needle.
pub fn row_matches(row: &Row, needle: &str, columns: &SearchColumns) -> bool {
    row.cells()
        .iter()
        .filter(|(field, _)| columns.includes(field))
        .any(|(_, value)| value.to_string().to_lowercase().contains(needle))
}
