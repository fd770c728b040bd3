//! Table options.

use serde_json::Map;
use serde_json::Value as Json;

use crate::error::ConfigError;
use crate::normalize::json_type;
use crate::pipeline::{PageSize, SortDirection};
use crate::selection::SelectionMode;

/// How rows are added and edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditStrategy {
    /// New rows are appended at once, cells are written in place.
    #[default]
    Direct,
    /// New rows open as a draft shown above the first visible row.
    Inline,
    /// New rows open as a draft edited outside the table.
    Modal,
}

impl EditStrategy {
    /// Parse `"direct"`, `"inline"` or `"modal"`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "direct" => Some(Self::Direct),
            "inline" => Some(Self::Inline),
            "modal" => Some(Self::Modal),
            _ => None,
        }
    }

    /// Returns `true` if adding a row opens a draft.
    pub fn uses_drafts(self) -> bool {
        !matches!(self, Self::Direct)
    }
}

/// Table behavior and the texts a renderer shows.
///
/// Defaults match the stock datatable component. Options can be built in
/// code or read from a JSON object with camelCase keys.
///
/// # Example
///
/// ```
/// use datagrid::options::{EditStrategy, TableOptions};
/// use datagrid::pipeline::PageSize;
///
/// let options = TableOptions::default()
///     .entries(PageSize::Count(25))
///     .multi_select()
///     .edit_strategy(EditStrategy::Inline);
///
/// assert!(options.selectable);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Text shown in blank cells
    pub default_value: String,

    /// Initial page size
    pub entries: PageSize,

    /// Page sizes offered to the user
    pub entries_options: Vec<PageSize>,

    /// When false every row is shown on a single page
    pub pagination: bool,

    pub selectable: bool,

    /// Allow more than one selected row
    pub multi: bool,

    /// A third click on a sorted header clears the sort
    pub force_sort: bool,

    /// Field sorted on construction
    pub sort_field: Option<String>,

    pub sort_order: SortDirection,

    pub edit_strategy: EditStrategy,

    pub loading: bool,
    pub loading_message: String,
    pub no_found_message: String,
    pub rows_text: String,
    pub of_text: String,
    pub all_text: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            default_value: "-".to_string(),
            entries: PageSize::Count(10),
            entries_options: [10, 25, 50, 200].into_iter().map(PageSize::Count).collect(),
            pagination: true,
            selectable: false,
            multi: false,
            force_sort: false,
            sort_field: None,
            sort_order: SortDirection::Ascending,
            edit_strategy: EditStrategy::Direct,
            loading: false,
            loading_message: "Loading results...".to_string(),
            no_found_message: "No matching results found".to_string(),
            rows_text: "Rows per page:".to_string(),
            of_text: "of".to_string(),
            all_text: "All".to_string(),
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults of the table editor: empty default cells and inline drafts.
    pub fn editor() -> Self {
        Self {
            default_value: String::new(),
            edit_strategy: EditStrategy::Inline,
            ..Default::default()
        }
    }

    /// Set the text shown in blank cells.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Set the initial page size.
    pub fn entries(mut self, entries: PageSize) -> Self {
        self.entries = entries;
        self
    }

    /// Set the page sizes offered to the user.
    pub fn entries_options(mut self, options: Vec<PageSize>) -> Self {
        self.entries_options = options;
        self
    }

    /// Show every row on one page.
    pub fn without_pagination(mut self) -> Self {
        self.pagination = false;
        self
    }

    /// Allow a single selected row.
    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    /// Allow any number of selected rows.
    pub fn multi_select(mut self) -> Self {
        self.selectable = true;
        self.multi = true;
        self
    }

    /// Let a third header click clear the sort.
    pub fn force_sort(mut self) -> Self {
        self.force_sort = true;
        self
    }

    /// Sort by `field` on construction.
    pub fn sort_by(mut self, field: impl Into<String>, order: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order;
        self
    }

    pub fn edit_strategy(mut self, strategy: EditStrategy) -> Self {
        self.edit_strategy = strategy;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Set the word between the visible range and the total.
    pub fn of_text(mut self, text: impl Into<String>) -> Self {
        self.of_text = text.into();
        self
    }

    /// Selection policy implied by `selectable` and `multi`.
    pub fn selection_mode(&self) -> SelectionMode {
        match (self.selectable, self.multi) {
            (false, _) => SelectionMode::None,
            (true, false) => SelectionMode::Single,
            (true, true) => SelectionMode::Multi,
        }
    }

    /// Page size the pipeline uses: everything when pagination is off.
    pub fn effective_page_size(&self) -> PageSize {
        if self.pagination {
            self.entries
        } else {
            PageSize::All
        }
    }

    /// Reject options no table can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entries == PageSize::Count(0) {
            return Err(ConfigError::option_value("entries", "page size must be at least 1"));
        }
        if self.entries_options.is_empty() {
            return Err(ConfigError::option_value(
                "entriesOptions",
                "at least one page size is required",
            ));
        }
        if self.entries_options.contains(&PageSize::Count(0)) {
            return Err(ConfigError::option_value(
                "entriesOptions",
                "page sizes must be at least 1",
            ));
        }
        Ok(())
    }

    // =========================================================================
    // JSON
    // =========================================================================

    /// Read options from a JSON object, starting from the defaults.
    ///
    /// Keys use the camelCase names of the original components
    /// (`entriesOptions`, `noFoundMessage`, ...). Each key is type checked.
    /// Presentation-only keys such as `striped` or `hover` are ignored.
    pub fn from_json(value: &Json) -> Result<Self, ConfigError> {
        let Json::Object(map) = value else {
            return Err(ConfigError::option_type("options", "object", json_type(value)));
        };
        let mut options = Self::default();
        options.apply_json(map)?;
        options.validate()?;
        Ok(options)
    }

    /// Parse JSON text, see [`TableOptions::from_json`].
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Json = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    fn apply_json(&mut self, map: &Map<String, Json>) -> Result<(), ConfigError> {
        for (key, value) in map {
            match key.as_str() {
                "defaultValue" => self.default_value = string_option(key, value)?,
                "entries" => self.entries = page_size_option(key, value)?,
                "entriesOptions" => {
                    let Json::Array(items) = value else {
                        return Err(ConfigError::option_type(key, "array", json_type(value)));
                    };
                    self.entries_options = items
                        .iter()
                        .map(|item| page_size_option(key, item))
                        .collect::<Result<_, _>>()?;
                }
                "pagination" => self.pagination = bool_option(key, value)?,
                "selectable" => self.selectable = bool_option(key, value)?,
                "multi" => self.multi = bool_option(key, value)?,
                "forceSort" => self.force_sort = bool_option(key, value)?,
                "sortField" => {
                    self.sort_field = match value {
                        Json::Null => None,
                        other => Some(string_option(key, other)?),
                    }
                }
                "sortOrder" => {
                    let name = string_option(key, value)?;
                    self.sort_order = SortDirection::parse(&name).ok_or_else(|| {
                        ConfigError::option_value(key, format!("unknown sort order '{}'", name))
                    })?;
                }
                "edit" => {
                    if bool_option(key, value)? {
                        self.edit_strategy = EditStrategy::Direct;
                    }
                }
                "mode" => {
                    let name = string_option(key, value)?;
                    self.edit_strategy = EditStrategy::parse(&name).ok_or_else(|| {
                        ConfigError::option_value(key, format!("unknown edit mode '{}'", name))
                    })?;
                }
                "loading" => self.loading = bool_option(key, value)?,
                "loadingMessage" => self.loading_message = string_option(key, value)?,
                "noFoundMessage" => self.no_found_message = string_option(key, value)?,
                "rowsText" => self.rows_text = string_option(key, value)?,
                "ofText" => self.of_text = string_option(key, value)?,
                "allText" => self.all_text = string_option(key, value)?,
                other => log::trace!("ignoring option '{}'", other),
            }
        }
        Ok(())
    }
}

fn string_option(key: &str, value: &Json) -> Result<String, ConfigError> {
    match value {
        Json::String(s) => Ok(s.clone()),
        other => Err(ConfigError::option_type(key, "string", json_type(other))),
    }
}

fn bool_option(key: &str, value: &Json) -> Result<bool, ConfigError> {
    match value {
        Json::Bool(b) => Ok(*b),
        other => Err(ConfigError::option_type(key, "boolean", json_type(other))),
    }
}

/// A page size is a count or the text `"All"`.
fn page_size_option(key: &str, value: &Json) -> Result<PageSize, ConfigError> {
    match value {
        Json::Number(n) => n
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(PageSize::Count)
            .ok_or_else(|| ConfigError::option_value(key, format!("{} is not a row count", n))),
        Json::String(text) => PageSize::parse(text)
            .ok_or_else(|| ConfigError::option_value(key, format!("unknown page size '{}'", text))),
        other => Err(ConfigError::option_type(key, "number or string", json_type(other))),
    }
}
