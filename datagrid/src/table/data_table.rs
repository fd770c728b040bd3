//! The table engine: stored rows, view state and the render pipeline.

use std::collections::BTreeMap;
use std::fmt;

use crate::edit::EditBuffer;
use crate::error::ConfigError;
use crate::events::{PendingChange, TableEvent, TableObserver};
use crate::model::{Column, Record, Row};
use crate::normalize::{TableData, canonical_row};
use crate::options::{EditStrategy, TableOptions};
use crate::pipeline::{PageSize, SearchColumns, SortDirection, paginate, search, sort};
use crate::selection::{Selection, SelectionMode};

use super::view_state::{SortState, ViewState};

/// A stored record and its canonical row.
#[derive(Debug, Clone)]
pub(super) struct StoredRow {
    pub(super) record: Record,
    pub(super) row: Row,
}

/// Tabular view over a set of rows.
///
/// The table owns its rows, the view state (search, sort, page), the
/// selection and at most one edit draft. Every operation that changes
/// what is visible re-runs search, sort and pagination before it returns.
/// Operations that do not apply (a page out of range, editing while
/// already editing, an unknown row) change nothing and are logged at
/// debug level.
///
/// # Example
///
/// ```
/// use datagrid::prelude::*;
///
/// let data = TableData::from_records(
///     vec![Column::new("name"), Column::new("age")],
///     vec![
///         Record::new().set("name", "Bob").set("age", 30),
///         Record::new().set("name", "Amy").set("age", 25),
///     ],
/// );
/// let mut table = DataTable::new(data, TableOptions::default())?;
///
/// table.sort("name", SortDirection::Ascending);
/// let names: Vec<String> = table
///     .visible_rows()
///     .iter()
///     .map(|row| row.value("name").to_string())
///     .collect();
/// assert_eq!(names, ["Amy", "Bob"]);
/// assert_eq!(table.navigation_text(), "1 - 2 of 2");
/// # Ok::<(), datagrid::error::ConfigError>(())
/// ```
pub struct DataTable {
    pub(super) columns: Vec<Column>,
    pub(super) options: TableOptions,
    /// Rows keyed by `row_index`; key order is insertion order
    pub(super) rows: BTreeMap<usize, StoredRow>,
    pub(super) next_row_index: usize,
    pub(super) state: ViewState,
    pub(super) selection: Selection,
    pub(super) edit: Option<EditBuffer>,
    /// Row indices after search and sort
    pub(super) search_result: Vec<usize>,
    pub(super) observers: Vec<Box<dyn TableObserver>>,
    pub(super) disposed: bool,
    pub(super) last_search_token: u64,
}

impl fmt::Debug for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("state", &self.state)
            .field("selection", &self.selection)
            .field("editing", &self.edit.as_ref().map(EditBuffer::target))
            .finish()
    }
}

impl DataTable {
    /// Build a table. Fails on an invalid schema or invalid options.
    pub fn new(data: TableData, options: TableOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        let normalized = data.normalize()?;

        let mut table = Self {
            columns: normalized.columns,
            state: ViewState::new(options.effective_page_size()),
            options,
            rows: BTreeMap::new(),
            next_row_index: 0,
            selection: Selection::new(),
            edit: None,
            search_result: Vec::new(),
            observers: Vec::new(),
            disposed: false,
            last_search_token: 0,
        };
        table.replace_records(normalized.records);
        table.apply_initial_sort();
        table.run_pipeline();

        log::debug!(
            "table built with {} columns and {} rows",
            table.columns.len(),
            table.rows.len()
        );
        Ok(table)
    }

    /// Register an observer (builder pattern).
    pub fn with_observer(mut self, observer: impl TableObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Register an observer.
    pub fn add_observer(&mut self, observer: Box<dyn TableObserver>) {
        self.observers.push(observer);
    }

    // =========================================================================
    // Internals shared by the operation modules
    // =========================================================================

    /// Store records with `row_index` equal to their position.
    pub(super) fn replace_records(&mut self, records: Vec<Record>) {
        self.rows.clear();
        for (row_index, record) in records.into_iter().enumerate() {
            let row = self.build_row(row_index, &record);
            self.rows.insert(row_index, StoredRow { record, row });
        }
        self.next_row_index = self.rows.len();
    }

    pub(super) fn build_row(&self, row_index: usize, record: &Record) -> Row {
        canonical_row(row_index, record, &self.columns, &self.options.default_value)
    }

    /// Store a record under `row_index`, replacing any previous record.
    pub(super) fn store(&mut self, row_index: usize, record: Record) -> Row {
        let row = self.build_row(row_index, &record);
        self.rows.insert(
            row_index,
            StoredRow {
                record,
                row: row.clone(),
            },
        );
        self.next_row_index = self.next_row_index.max(row_index + 1);
        row
    }

    fn apply_initial_sort(&mut self) {
        let Some(field) = self.options.sort_field.clone() else {
            return;
        };
        match self.sortable_column(&field) {
            Some(field) => {
                self.state.sort = SortState {
                    field: Some(field),
                    direction: self.options.sort_order,
                };
            }
            None => log::debug!("initial sort field '{}' ignored", field),
        }
    }

    /// Find a column by field, then by label.
    pub(super) fn resolve_column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.field == name)
            .or_else(|| self.columns.iter().find(|c| c.label == name))
    }

    pub(super) fn column(&self, field: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Re-run search and sort, and keep the active page in range.
    pub(super) fn run_pipeline(&mut self) {
        let rows: Vec<&Row> = self.rows.values().map(|stored| &stored.row).collect();
        let found = if self.state.remote_results {
            rows
        } else {
            search(rows, &self.state.search_term, &self.state.search_columns)
        };
        let ordered = match (&self.state.sort.field, self.state.sort.direction) {
            (Some(field), direction) => sort(found, field, direction),
            (None, _) => found,
        };
        let search_result: Vec<usize> = ordered.iter().map(|row| row.row_index()).collect();

        self.search_result = search_result;
        if self.state.clamp_page(self.search_result.len()) {
            log::debug!("active page clamped to {}", self.state.active_page);
        }
    }

    /// Re-run the pipeline and report the visible rows.
    pub(super) fn refresh(&mut self) {
        self.run_pipeline();
        let row_indices = self.visible_row_indices();
        self.emit(TableEvent::Rendered { row_indices });
    }

    pub(super) fn emit(&mut self, event: TableEvent) {
        if self.disposed {
            return;
        }
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    /// Ask every observer; the first refusal cancels.
    pub(super) fn approve(&mut self, change: PendingChange) -> bool {
        if self.disposed {
            return true;
        }
        let approved = self
            .observers
            .iter_mut()
            .all(|observer| observer.approve(&change));
        if !approved {
            log::debug!("{:?} of row {} vetoed", change.kind, change.row.row_index());
        }
        approved
    }

    pub(super) fn emit_selection(&mut self) {
        let event = TableEvent::SelectionChanged {
            selected_rows: self.selected_rows(),
            selected_indices: self.selection.selected(),
            all_selected: self.is_all_selected(),
        };
        self.emit(event);
    }

    /// Drop the open draft, telling observers the editor closed.
    pub(super) fn close_editor(&mut self) {
        if self.edit.take().is_some() {
            self.emit(TableEvent::EditorClosed);
        }
    }

    // =========================================================================
    // Search, sort and paging
    // =========================================================================

    /// Filter rows by `term` in `columns` and go back to the first page.
    ///
    /// Remote answers still in flight are dropped when they arrive.
    pub fn search(&mut self, term: impl Into<String>, columns: impl Into<SearchColumns>) {
        self.supersede_remote_search();
        self.state.search_term = term.into();
        self.state.search_columns = columns.into();
        self.state.remote_results = false;
        self.state.active_page = 0;

        self.emit(TableEvent::SearchChanged {
            term: self.state.search_term.clone(),
            columns: self.state.search_columns.clone(),
        });
        self.refresh();
    }

    /// Header click with an explicit `force_sort`.
    ///
    /// Targeting the sorted field again moves it one step along
    /// `none -> asc -> desc -> (none or asc)`. Another field starts at
    /// ascending. The page is kept.
    pub fn set_sort(&mut self, field: &str, force_sort: bool) {
        let Some(column) = self.sortable_column(field) else {
            return;
        };
        let direction = match &self.state.sort.field {
            Some(sorted) if *sorted == column => self.state.sort.direction.cycle(force_sort),
            _ => SortDirection::Ascending,
        };
        self.apply_sort(column, direction);
    }

    /// Header click, using the `force_sort` option.
    pub fn toggle_sort(&mut self, field: &str) {
        self.set_sort(field, self.options.force_sort);
    }

    /// Sort by `field` in `direction`. `field` may also be a column label.
    pub fn sort(&mut self, field: &str, direction: SortDirection) {
        if let Some(column) = self.sortable_column(field) {
            self.apply_sort(column, direction);
        }
    }

    fn sortable_column(&self, name: &str) -> Option<String> {
        match self.resolve_column(name) {
            Some(column) if column.sortable => Some(column.field.clone()),
            Some(_) => {
                log::debug!("column '{}' is not sortable", name);
                None
            }
            None => {
                log::debug!("no column '{}' to sort by", name);
                None
            }
        }
    }

    fn apply_sort(&mut self, field: String, direction: SortDirection) {
        self.state.sort = SortState {
            field: Some(field.clone()),
            direction,
        };
        self.emit(TableEvent::SortChanged {
            field: Some(field),
            direction,
        });
        self.refresh();
    }

    /// Show page `index`. Pages past the last one are ignored.
    pub fn set_active_page(&mut self, index: usize) {
        let page_count = self.page_count();
        if index >= page_count {
            log::debug!("page {} out of range ({} pages)", index, page_count);
            return;
        }
        self.state.active_page = index;
        self.emit(TableEvent::PageChanged { page: index });
        self.refresh();
    }

    pub fn next_page(&mut self) {
        self.set_active_page(self.state.active_page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        if let Some(page) = self.state.active_page.checked_sub(1) {
            self.set_active_page(page);
        }
    }

    pub fn first_page(&mut self) {
        self.set_active_page(0);
    }

    pub fn last_page(&mut self) {
        self.set_active_page(self.page_count() - 1);
    }

    pub fn can_go_previous(&self) -> bool {
        self.state.active_page > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.state.active_page + 1 < self.page_count()
    }

    /// Change the number of rows per page, keeping the page in range.
    ///
    /// A zero page size is ignored, as is any change while pagination is
    /// turned off.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        if page_size == PageSize::Count(0) {
            log::debug!("ignoring zero page size");
            return;
        }
        if !self.options.pagination {
            log::debug!("pagination is disabled");
            return;
        }
        self.state.page_size = page_size;
        self.emit(TableEvent::PageSizeChanged { page_size });
        self.refresh();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Toggle the selection of a row.
    ///
    /// A single-select table always replaces the selection, whatever
    /// `multi` says. Non-selectable tables and unknown rows are ignored.
    pub fn toggle_row_selection(&mut self, row_index: usize, multi: bool) {
        let mode = self.options.selection_mode();
        if mode == SelectionMode::None {
            log::debug!("table is not selectable");
            return;
        }
        if !self.rows.contains_key(&row_index) {
            log::debug!("cannot select unknown row {}", row_index);
            return;
        }
        self.selection.toggle(row_index, multi && mode.is_multi());
        self.emit_selection();
    }

    /// Toggle a row using the table's selection mode.
    pub fn toggle_row(&mut self, row_index: usize) {
        let multi = self.options.selection_mode().is_multi();
        self.toggle_row_selection(row_index, multi);
    }

    /// Select every row, including rows hidden by the search. Multi-select
    /// tables only.
    pub fn select_all(&mut self) {
        if !self.options.selection_mode().is_multi() {
            log::debug!("select all needs a multi-select table");
            return;
        }
        let all: Vec<usize> = self.rows.keys().copied().collect();
        if !self.selection.select_all(all).is_empty() {
            self.emit_selection();
        }
    }

    pub fn select_none(&mut self) {
        if !self.selection.clear().is_empty() {
            self.emit_selection();
        }
    }

    /// Header checkbox click: select everything, or clear a full selection.
    pub fn toggle_all(&mut self) {
        if self.is_all_selected() {
            self.select_none();
        } else {
            self.select_all();
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Replace the data, the options, or both.
    ///
    /// Everything is checked before anything changes, so a failed update
    /// leaves the table as it was. Selection and edit state are cleared,
    /// and new data makes remote answers still in flight stale.
    pub fn update(
        &mut self,
        data: Option<TableData>,
        options: Option<TableOptions>,
    ) -> Result<(), ConfigError> {
        if let Some(options) = &options {
            options.validate()?;
        }
        let normalized = data.map(TableData::normalize).transpose()?;

        if let Some(options) = options {
            self.state.page_size = options.effective_page_size();
            self.options = options;
        }
        if let Some(normalized) = normalized {
            self.supersede_remote_search();
            self.columns = normalized.columns;
            self.replace_records(normalized.records);
            self.state.remote_results = false;
            let sorted_field_gone = match &self.state.sort.field {
                Some(field) => self.column(field).is_none(),
                None => false,
            };
            if sorted_field_gone {
                self.state.sort = SortState::default();
            }
        } else {
            let records: Vec<(usize, Record)> = self
                .rows
                .iter()
                .map(|(&row_index, stored)| (row_index, stored.record.clone()))
                .collect();
            for (row_index, record) in records {
                self.store(row_index, record);
            }
        }
        if self.options.sort_field.is_some() && self.state.sort.field.is_none() {
            self.apply_initial_sort();
        }
        self.selection.clear();
        self.close_editor();

        self.emit(TableEvent::Updated);
        self.refresh();
        Ok(())
    }

    /// Drop selection and edit state and stop notifying observers.
    pub fn dispose(&mut self) {
        self.supersede_remote_search();
        self.selection.clear();
        self.edit = None;
        self.observers.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    /// Every stored row in insertion order, ignoring search.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values().map(|stored| &stored.row)
    }

    pub fn row(&self, row_index: usize) -> Option<&Row> {
        self.rows.get(&row_index).map(|stored| &stored.row)
    }

    /// The record as stored, without defaults.
    pub fn record(&self, row_index: usize) -> Option<&Record> {
        self.rows.get(&row_index).map(|stored| &stored.record)
    }

    /// Number of stored rows.
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// Rows matching the search, sorted, across all pages.
    pub fn search_result(&self) -> Vec<&Row> {
        self.search_result
            .iter()
            .filter_map(|row_index| self.row(*row_index))
            .collect()
    }

    fn visible_row_indices(&self) -> Vec<usize> {
        paginate(
            &self.search_result,
            self.state.page_size,
            self.state.active_page,
        )
        .to_vec()
    }

    /// Rows on the active page.
    ///
    /// With inline editing, a new draft is shown first and an edited row
    /// shows its draft values.
    pub fn visible_rows(&self) -> Vec<Row> {
        let mut visible = Vec::new();
        let inline = self.options.edit_strategy == EditStrategy::Inline;

        if let Some(edit) = self.edit.as_ref().filter(|e| inline && e.is_new()) {
            visible.push(self.build_row(self.next_row_index, edit.draft()));
        }
        for row_index in self.visible_row_indices() {
            match &self.edit {
                Some(edit) if inline && edit.row_index() == Some(row_index) => {
                    visible.push(self.build_row(row_index, edit.draft()));
                }
                _ => {
                    if let Some(row) = self.row(row_index) {
                        visible.push(row.clone());
                    }
                }
            }
        }
        visible
    }

    pub fn page_count(&self) -> usize {
        self.state.page_size.page_count(self.search_result.len())
    }

    pub fn active_page(&self) -> usize {
        self.state.active_page
    }

    pub fn page_size(&self) -> PageSize {
        self.state.page_size
    }

    pub fn sort_state(&self) -> &SortState {
        &self.state.sort
    }

    pub fn search_term(&self) -> &str {
        &self.state.search_term
    }

    /// Pagination label such as `"11 - 20 of 42"`.
    pub fn navigation_text(&self) -> String {
        let total = self.search_result.len();
        let of = &self.options.of_text;
        if total == 0 {
            return format!("0 {} 0", of);
        }
        match self.state.page_size {
            PageSize::All => format!("1 - {} {} {}", total, of, total),
            PageSize::Count(size) => {
                let first = self.state.page_size.offset(self.state.active_page);
                let last = first.saturating_add(size).min(total);
                format!("{} - {} {} {}", first + 1, last, of, total)
            }
        }
    }

    /// Message to show instead of rows, when nothing matches.
    pub fn empty_message(&self) -> Option<&str> {
        if self.options.loading {
            Some(&self.options.loading_message)
        } else if self.search_result.is_empty() {
            Some(&self.options.no_found_message)
        } else {
            None
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected rows in insertion order.
    pub fn selected_rows(&self) -> Vec<Row> {
        self.rows
            .values()
            .filter(|stored| self.selection.is_selected(stored.row.row_index()))
            .map(|stored| stored.row.clone())
            .collect()
    }

    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(self.rows.len())
    }

    pub fn is_indeterminate(&self) -> bool {
        self.selection.is_indeterminate(self.rows.len())
    }
}
