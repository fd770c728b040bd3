//! Query, sort and paging state of a table

use crate::pipeline::{PageSize, SearchColumns, SortDirection};

/// Current sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// Sorted field, `None` until a column is sorted
    pub field: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// Returns `true` if rows are reordered.
    pub fn is_active(&self) -> bool {
        self.field.is_some() && self.direction != SortDirection::None
    }

    /// Direction shown on the header of `field`.
    pub fn direction_of(&self, field: &str) -> SortDirection {
        match &self.field {
            Some(sorted) if sorted == field => self.direction,
            _ => SortDirection::None,
        }
    }
}

/// Everything that decides which rows are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    pub search_columns: SearchColumns,
    pub sort: SortState,
    pub active_page: usize,
    pub page_size: PageSize,
    /// Rows came from a remote search and are already filtered
    pub(crate) remote_results: bool,
}

impl ViewState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            search_term: String::new(),
            search_columns: SearchColumns::All,
            sort: SortState::default(),
            active_page: 0,
            page_size,
            remote_results: false,
        }
    }

    /// Move the active page back into range for `total` rows.
    ///
    /// Returns `true` if the page changed.
    pub fn clamp_page(&mut self, total: usize) -> bool {
        let last = self.page_size.page_count(total) - 1;
        if self.active_page > last {
            self.active_page = last;
            true
        } else {
            false
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}
