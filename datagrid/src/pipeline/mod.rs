//! The search, sort and paginate stages.
//!
//! Each stage is a pure function over borrowed rows. The table runs them in
//! order (search, then sort, then paginate) after every state change.

mod paginate;
mod search;
mod sort;

pub use paginate::{PageSize, paginate};
pub use search::{SearchColumns, row_matches, search};
pub use sort::{SortDirection, compare_values, sort};
