//! Row selection.
//!
//! Selection is keyed by stable `row_index` values, so it survives
//! searching, sorting and paging. Rows that are filtered out stay selected.

use std::collections::HashSet;

/// Selection policy of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Rows cannot be selected
    #[default]
    None,
    /// Selecting a row deselects every other row
    Single,
    /// Any number of rows can be selected
    Multi,
}

impl SelectionMode {
    pub fn is_multi(self) -> bool {
        matches!(self, Self::Multi)
    }
}

/// Set of selected row indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<usize>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected row indices, sorted.
    pub fn selected(&self) -> Vec<usize> {
        let mut indices: Vec<_> = self.selected.iter().copied().collect();
        indices.sort_unstable();
        indices
    }

    pub fn is_selected(&self, row_index: usize) -> bool {
        self.selected.contains(&row_index)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Header checkbox state: every one of `total` rows is selected. An
    /// empty selection of an empty table counts as all selected.
    pub fn is_all_selected(&self, total: usize) -> bool {
        self.selected.len() == total
    }

    /// Header checkbox state: some but not all rows are selected.
    pub fn is_indeterminate(&self, total: usize) -> bool {
        !self.selected.is_empty() && self.selected.len() < total
    }

    /// Toggle one row.
    ///
    /// With `multi` the row is added or removed on its own. Without it,
    /// adding a row replaces the whole set. Returns (added, removed).
    pub fn toggle(&mut self, row_index: usize, multi: bool) -> (Vec<usize>, Vec<usize>) {
        if self.selected.remove(&row_index) {
            return (vec![], vec![row_index]);
        }

        let removed = if multi {
            Vec::new()
        } else {
            let mut removed: Vec<_> = self.selected.drain().collect();
            removed.sort_unstable();
            removed
        };
        self.selected.insert(row_index);
        (vec![row_index], removed)
    }

    /// Select every index in `all`. Returns the newly selected indices.
    pub fn select_all(&mut self, all: impl IntoIterator<Item = usize>) -> Vec<usize> {
        all.into_iter()
            .filter(|&row_index| self.selected.insert(row_index))
            .collect()
    }

    /// Clear the selection. Returns the indices that were deselected.
    pub fn clear(&mut self) -> Vec<usize> {
        let mut removed: Vec<_> = self.selected.drain().collect();
        removed.sort_unstable();
        removed
    }

    /// Drop one row. Returns `true` if it was selected.
    pub fn remove(&mut self, row_index: usize) -> bool {
        self.selected.remove(&row_index)
    }

    /// Keep only the indices for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) {
        self.selected.retain(|&row_index| keep(row_index));
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}
