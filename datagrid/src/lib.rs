//! Tabular data view engine
//!
//! Takes rows and a column schema, keeps a view state (search, sort, page,
//! selection, one edit draft) and computes the rows to render after every
//! change. Rendering is left to the caller.

pub mod edit;
pub mod error;
pub mod events;
pub mod model;
pub mod normalize;
pub mod options;
pub mod pipeline;
pub mod selection;
pub mod source;
pub mod table;

pub use table::DataTable;

pub mod prelude {
    pub use crate::edit::{EditTarget, FieldError, ValidationResult};
    pub use crate::error::{ConfigError, SourceError};
    pub use crate::events::{ChangeKind, EventLog, PendingChange, TableEvent, TableObserver};
    pub use crate::model::{Column, Fixed, InputType, Record, Row, Value};
    pub use crate::normalize::{RawRow, ScrapedHeader, ScrapedTable, TableData};
    pub use crate::options::{EditStrategy, TableOptions};
    pub use crate::pipeline::{PageSize, SearchColumns, SortDirection};
    pub use crate::selection::{Selection, SelectionMode};
    pub use crate::source::{RemoteSearch, RowSource};
    pub use crate::table::{AddOutcome, CommitOutcome, DataTable, SortState};
}
