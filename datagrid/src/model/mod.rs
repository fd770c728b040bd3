//! Data model: cell values, columns, stored records and canonical rows

mod column;
mod record;
mod value;

pub use column::*;
pub use record::*;
pub use value::*;
