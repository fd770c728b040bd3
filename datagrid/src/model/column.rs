//! Column schema types.

use std::fmt;
use std::sync::Arc;

use super::Value;

/// Which side of the table a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fixed {
    #[default]
    None,
    Left,
    Right,
}

/// Editor input used for a column.
///
/// The engine uses it to coerce edited values and to validate drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Number,
    Checkbox,
    Select,
    Date,
}

impl InputType {
    /// Parse the names used in column definitions (`"text"`, `"number"`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "checkbox" => Some(Self::Checkbox),
            "select" => Some(Self::Select),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    /// Returns `true` for inputs whose value is free or chosen text.
    pub fn is_textual(self) -> bool {
        matches!(self, Self::Text | Self::Select | Self::Date)
    }
}

/// Cell formatter handed through to renderers.
///
/// The engine never calls it. It is invoked by the rendering layer with the
/// column field and the cell value.
#[derive(Clone)]
pub struct CellFormat(Arc<dyn Fn(&str, &Value) -> String + Send + Sync>);

impl CellFormat {
    /// Wrap a formatting closure.
    pub fn new(f: impl Fn(&str, &Value) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Format one cell.
    pub fn apply(&self, field: &str, value: &Value) -> String {
        (self.0)(field, value)
    }
}

impl fmt::Debug for CellFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellFormat(..)")
    }
}

/// Column configuration.
///
/// Columns define the structure of the table: the field each cell is read
/// from, the header label, and how the column sorts and edits.
///
/// # Examples
///
/// ```
/// use datagrid::model::{Column, InputType};
///
/// let columns = vec![
///     Column::new("name").label("Name").required(),
///     Column::new("age").label("Age").input_type(InputType::Number),
///     Column::new("notes").unsortable().read_only(),
/// ];
/// assert!(columns[0].sortable);
/// assert!(!columns[2].editable);
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    /// Key into row cells
    pub field: String,
    /// Header text
    pub label: String,
    /// Position in the schema, assigned when the table is built
    pub column_index: usize,
    pub sortable: bool,
    pub fixed: Fixed,
    /// Width hint in pixels
    pub width: Option<u32>,
    pub input_type: InputType,
    /// Choices for `InputType::Select`
    pub options: Vec<String>,
    pub editable: bool,
    /// Drafts with a blank value in this column do not validate
    pub required: bool,
    /// Replaces blank cells; the table-wide default is used when unset
    pub default_value: Option<String>,
    pub format: Option<CellFormat>,
}

impl Column {
    /// Create a column reading `field`, labelled with the field name.
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            label: field.clone(),
            field,
            column_index: 0,
            sortable: true,
            fixed: Fixed::None,
            width: None,
            input_type: InputType::Text,
            options: Vec::new(),
            editable: true,
            required: false,
            default_value: None,
            format: None,
        }
    }

    /// Set the header label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Disable sorting on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Pin the column to one side.
    pub fn fixed(mut self, fixed: Fixed) -> Self {
        self.fixed = fixed;
        self
    }

    /// Set the width hint.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the editor input type.
    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    /// Set the choices of a select input.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Prevent edits to this column.
    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Require a non-blank value when a draft is committed.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the value shown for blank cells.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Attach a renderer-side cell formatter.
    pub fn format(mut self, format: CellFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The text substituted for blank cells in this column.
    ///
    /// An empty column default falls back to the table-wide default.
    pub fn fallback<'a>(&'a self, table_default: &'a str) -> &'a str {
        match self.default_value.as_deref() {
            Some(value) if !value.is_empty() => value,
            _ => table_default,
        }
    }

    /// Apply default substitution to a cell read from this column.
    pub fn resolve(&self, value: Value, table_default: &str) -> Value {
        if value.is_blank() {
            Value::String(self.fallback(table_default).to_string())
        } else {
            value
        }
    }
}
