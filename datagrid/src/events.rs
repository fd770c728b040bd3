//! Table notifications and veto hooks.
//!
//! A table reports every state change to its observers as a [`TableEvent`]
//! after the change is applied. Adding, committing, deleting and opening the
//! editor are first offered to [`TableObserver::approve`]; a `false` answer
//! cancels the operation before anything changes.

use std::sync::{Arc, RwLock};

use crate::model::{Record, Row};
use crate::pipeline::{PageSize, SearchColumns, SortDirection};

/// A change applied to a table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// The visible rows were recomputed.
    Rendered { row_indices: Vec<usize> },
    RowAdded { row: Row },
    /// A stored row was replaced. `previous` is the record before the edit.
    RowEdited { row: Row, previous: Record },
    RowDeleted { row: Row },
    SelectionChanged {
        selected_rows: Vec<Row>,
        selected_indices: Vec<usize>,
        all_selected: bool,
    },
    PageChanged { page: usize },
    PageSizeChanged { page_size: PageSize },
    SortChanged {
        field: Option<String>,
        direction: SortDirection,
    },
    SearchChanged {
        term: String,
        columns: SearchColumns,
    },
    /// The editor opened on a stored row, or on a new draft (`None`).
    EditorOpened { row_index: Option<usize> },
    EditorClosed,
    /// Data or options were replaced wholesale.
    Updated,
}

/// Kind of a [`TableEvent`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableEventKind {
    Rendered,
    RowAdded,
    RowEdited,
    RowDeleted,
    SelectionChanged,
    PageChanged,
    PageSizeChanged,
    SortChanged,
    SearchChanged,
    EditorOpened,
    EditorClosed,
    Updated,
}

impl TableEvent {
    pub fn kind(&self) -> TableEventKind {
        match self {
            Self::Rendered { .. } => TableEventKind::Rendered,
            Self::RowAdded { .. } => TableEventKind::RowAdded,
            Self::RowEdited { .. } => TableEventKind::RowEdited,
            Self::RowDeleted { .. } => TableEventKind::RowDeleted,
            Self::SelectionChanged { .. } => TableEventKind::SelectionChanged,
            Self::PageChanged { .. } => TableEventKind::PageChanged,
            Self::PageSizeChanged { .. } => TableEventKind::PageSizeChanged,
            Self::SortChanged { .. } => TableEventKind::SortChanged,
            Self::SearchChanged { .. } => TableEventKind::SearchChanged,
            Self::EditorOpened { .. } => TableEventKind::EditorOpened,
            Self::EditorClosed => TableEventKind::EditorClosed,
            Self::Updated => TableEventKind::Updated,
        }
    }
}

/// What a pending change is about to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Add,
    Edit,
    Delete,
    OpenEditor,
}

/// A change waiting for approval.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChange {
    pub kind: ChangeKind,
    /// The row as it will be stored (add, edit) or as it is (delete, open)
    pub row: Row,
}

/// Receives table notifications.
///
/// Both methods have default implementations, so observers only implement
/// what they need.
pub trait TableObserver: Send {
    /// Called after a change is applied.
    fn on_event(&mut self, _event: &TableEvent) {}

    /// Called before a change is applied. Return `false` to cancel it.
    fn approve(&mut self, _change: &PendingChange) -> bool {
        true
    }
}

#[derive(Debug, Default)]
struct EventLogInner {
    events: Vec<TableEvent>,
    pending: Vec<PendingChange>,
    vetoed: Vec<ChangeKind>,
}

/// Observer that records everything it sees.
///
/// Clones share the same log, so one clone can be handed to a table while
/// another is inspected.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    inner: Arc<RwLock<EventLogInner>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every pending change of `kind` (builder pattern).
    pub fn veto(self, kind: ChangeKind) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.vetoed.push(kind);
        }
        self
    }

    /// Events received so far.
    pub fn events(&self) -> Vec<TableEvent> {
        self.inner
            .read()
            .map(|g| g.events.clone())
            .unwrap_or_default()
    }

    /// Kinds of the events received so far.
    pub fn kinds(&self) -> Vec<TableEventKind> {
        self.inner
            .read()
            .map(|g| g.events.iter().map(TableEvent::kind).collect())
            .unwrap_or_default()
    }

    /// Changes offered for approval so far.
    pub fn pending(&self) -> Vec<PendingChange> {
        self.inner
            .read()
            .map(|g| g.pending.clone())
            .unwrap_or_default()
    }

    /// Forget all recorded events and changes.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.events.clear();
            guard.pending.clear();
        }
    }
}

impl TableObserver for EventLog {
    fn on_event(&mut self, event: &TableEvent) {
        if let Ok(mut guard) = self.inner.write() {
            guard.events.push(event.clone());
        }
    }

    fn approve(&mut self, change: &PendingChange) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return true;
        };
        guard.pending.push(change.clone());
        !guard.vetoed.contains(&change.kind)
    }
}
