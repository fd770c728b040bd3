//! Configuration error types

/// Error raised when a table is constructed or updated with invalid
/// columns, rows or options.
///
/// This is the only error the engine raises on purpose. Everything else
/// (out-of-range pages, editing while already editing, unknown row indices)
/// is treated as a no-op.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// An option holds a value of the wrong JSON type.
    #[error("option '{option}' expected {expected}, got {found}")]
    OptionType {
        option: String,
        expected: &'static str,
        found: &'static str,
    },

    /// An option has the right type but an unusable value.
    #[error("option '{option}' is invalid: {reason}")]
    OptionValue { option: String, reason: String },

    /// A column definition is malformed.
    #[error("column {index} is invalid: {reason}")]
    Column { index: usize, reason: String },

    /// Two columns share the same field.
    #[error("duplicate column field '{field}' (columns {first} and {second})")]
    DuplicateField {
        field: String,
        first: usize,
        second: usize,
    },

    /// A row is neither an array of cells nor an object.
    #[error("row {index} must be an array or an object, got {found}")]
    Row { index: usize, found: &'static str },

    /// A top-level section of the data is not an array.
    #[error("'{section}' must be an array, got {found}")]
    NotAnArray {
        section: &'static str,
        found: &'static str,
    },

    /// The input could not be parsed as JSON at all.
    #[error("invalid JSON: {0}")]
    Json(String),
}

impl ConfigError {
    /// Creates an option type error.
    pub fn option_type(
        option: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::OptionType {
            option: option.into(),
            expected,
            found,
        }
    }

    /// Creates an option value error.
    pub fn option_value(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OptionValue {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Creates a column error.
    pub fn column(index: usize, reason: impl Into<String>) -> Self {
        Self::Column {
            index,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
