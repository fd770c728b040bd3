//! The table view engine.

mod data_table;
mod editing;
mod remote;
mod view_state;

pub use data_table::DataTable;
pub use editing::{AddOutcome, CommitOutcome};
pub use view_state::{SortState, ViewState};
