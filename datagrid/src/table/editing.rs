//! Adding, editing and deleting rows

use crate::edit::{EditBuffer, EditTarget, ValidationResult, coerce, validate};
use crate::events::{ChangeKind, PendingChange, TableEvent};
use crate::model::{Record, Value};
use crate::normalize::empty_record;

use super::DataTable;

/// Result of [`DataTable::add_row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The row was stored.
    Added { row_index: usize },
    /// A draft for the row was opened in the editor.
    Drafting,
    /// An observer refused the change.
    Vetoed,
    /// Another row is being edited.
    Busy,
}

/// Result of [`DataTable::commit_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The draft was stored under `row_index`.
    Committed { row_index: usize },
    /// The draft failed validation and is still open.
    Invalid(ValidationResult),
    /// An observer refused the change; the draft is still open.
    Vetoed,
    NotEditing,
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

impl DataTable {
    /// Add a row built from the column defaults with `partial` on top.
    ///
    /// With the direct strategy the row is stored at once. Otherwise the
    /// row opens as a draft and is stored by [`DataTable::commit_edit`].
    pub fn add_row(&mut self, partial: Record) -> AddOutcome {
        if self.edit.is_some() {
            log::debug!("cannot add a row while editing");
            return AddOutcome::Busy;
        }

        let mut record = empty_record(&self.columns, &self.options.default_value);
        record.merge(&partial);
        let row_index = self.next_row_index;
        let row = self.build_row(row_index, &record);

        if self.options.edit_strategy.uses_drafts() {
            let change = PendingChange {
                kind: ChangeKind::OpenEditor,
                row,
            };
            if !self.approve(change) {
                return AddOutcome::Vetoed;
            }
            self.edit = Some(EditBuffer::new_row(record));
            self.emit(TableEvent::EditorOpened { row_index: None });
            self.refresh();
            return AddOutcome::Drafting;
        }

        let change = PendingChange {
            kind: ChangeKind::Add,
            row,
        };
        if !self.approve(change) {
            return AddOutcome::Vetoed;
        }
        let row = self.store(row_index, record);
        self.emit(TableEvent::RowAdded { row });
        self.refresh();
        AddOutcome::Added { row_index }
    }

    /// Open the editor on a stored row.
    ///
    /// Returns `false` when another row is being edited, the row does not
    /// exist, or an observer refuses.
    pub fn edit_row(&mut self, row_index: usize) -> bool {
        if let Some(edit) = &self.edit {
            log::debug!(
                "cannot edit row {} while editing {:?}",
                row_index,
                edit.target()
            );
            return false;
        }
        let Some(stored) = self.rows.get(&row_index) else {
            log::debug!("cannot edit unknown row {}", row_index);
            return false;
        };
        let record = stored.record.clone();
        let change = PendingChange {
            kind: ChangeKind::OpenEditor,
            row: stored.row.clone(),
        };
        if !self.approve(change) {
            return false;
        }

        self.edit = Some(EditBuffer::existing(row_index, record));
        self.emit(TableEvent::EditorOpened {
            row_index: Some(row_index),
        });
        self.refresh();
        true
    }

    /// Write a value into the open draft, coerced by the column input type.
    ///
    /// Returns `false` when nothing is being edited, the field is unknown
    /// or the column is read only.
    pub fn update_field(&mut self, field: &str, raw: impl Into<Value>) -> bool {
        let Some(column) = self.columns.iter().find(|c| c.field == field) else {
            log::debug!("no column '{}' to update", field);
            return false;
        };
        let Some(edit) = self.edit.as_mut() else {
            log::debug!("no open draft to update '{}' in", field);
            return false;
        };
        edit.update_field(column, raw)
    }

    /// Validate and store the open draft.
    ///
    /// A new row gets the next free `row_index`; an edited row keeps its
    /// own. The draft stays open when validation fails or an observer
    /// refuses.
    pub fn commit_edit(&mut self) -> CommitOutcome {
        let Some(edit) = &self.edit else {
            log::debug!("nothing to commit");
            return CommitOutcome::NotEditing;
        };

        let result = validate(edit.draft(), &self.columns);
        if result.is_invalid() {
            log::debug!("draft rejected: {} invalid fields", result.errors().len());
            return CommitOutcome::Invalid(result);
        }

        let (kind, row_index) = match edit.target() {
            EditTarget::Existing(row_index) => (ChangeKind::Edit, row_index),
            EditTarget::New => (ChangeKind::Add, self.next_row_index),
        };
        let change = PendingChange {
            kind,
            row: self.build_row(row_index, edit.draft()),
        };
        if !self.approve(change) {
            return CommitOutcome::Vetoed;
        }

        let Some(edit) = self.edit.take() else {
            return CommitOutcome::NotEditing;
        };
        let previous = edit.original().clone();
        let row = self.store(row_index, edit.into_draft());

        match kind {
            ChangeKind::Add => self.emit(TableEvent::RowAdded { row }),
            _ => self.emit(TableEvent::RowEdited { row, previous }),
        }
        self.emit(TableEvent::EditorClosed);
        self.refresh();
        CommitOutcome::Committed { row_index }
    }

    /// Close the editor without storing anything.
    pub fn discard_edit(&mut self) -> bool {
        if self.edit.take().is_none() {
            log::debug!("nothing to discard");
            return false;
        }
        self.emit(TableEvent::EditorClosed);
        self.refresh();
        true
    }

    /// Remove a row and drop it from the selection.
    ///
    /// Ignored while editing and for unknown rows. Other rows keep their
    /// `row_index`.
    pub fn delete_row(&mut self, row_index: usize) -> bool {
        if self.edit.is_some() {
            log::debug!("cannot delete row {} while editing", row_index);
            return false;
        }
        let Some(stored) = self.rows.get(&row_index) else {
            log::debug!("cannot delete unknown row {}", row_index);
            return false;
        };
        let change = PendingChange {
            kind: ChangeKind::Delete,
            row: stored.row.clone(),
        };
        if !self.approve(change) {
            return false;
        }

        let Some(removed) = self.rows.remove(&row_index) else {
            return false;
        };
        let was_selected = self.selection.remove(row_index);

        self.emit(TableEvent::RowDeleted { row: removed.row });
        if was_selected {
            self.emit_selection();
        }
        self.refresh();
        true
    }

    /// Write one cell of a stored row directly, without opening a draft.
    ///
    /// The value is coerced like an editor value. Ignored for unknown rows
    /// and fields, read-only columns, and the row that is being edited.
    pub fn update_cell(&mut self, row_index: usize, field: &str, raw: impl Into<Value>) -> bool {
        let Some(column) = self.column(field) else {
            log::debug!("no column '{}' to update", field);
            return false;
        };
        if !column.editable {
            log::debug!("column '{}' is read only", field);
            return false;
        }
        let value = coerce(column.input_type, raw.into());

        if self.editing_row() == Some(EditTarget::Existing(row_index)) {
            log::debug!("row {} has an open draft", row_index);
            return false;
        }
        let Some(stored) = self.rows.get(&row_index) else {
            log::debug!("cannot update unknown row {}", row_index);
            return false;
        };

        let previous = stored.record.clone();
        let mut record = previous.clone();
        record.insert(field, value);
        let change = PendingChange {
            kind: ChangeKind::Edit,
            row: self.build_row(row_index, &record),
        };
        if !self.approve(change) {
            return false;
        }

        let row = self.store(row_index, record);
        self.emit(TableEvent::RowEdited { row, previous });
        self.refresh();
        true
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// What the open editor is editing.
    pub fn editing_row(&self) -> Option<EditTarget> {
        self.edit.as_ref().map(EditBuffer::target)
    }

    /// The open draft.
    pub fn draft(&self) -> Option<&Record> {
        self.edit.as_ref().map(EditBuffer::draft)
    }

    /// Validate the open draft without committing it.
    pub fn validate_draft(&self) -> Option<ValidationResult> {
        self.edit
            .as_ref()
            .map(|edit| validate(edit.draft(), &self.columns))
    }
}
