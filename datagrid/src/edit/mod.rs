//! Row editing: the draft buffer, value coercion and validation.

mod buffer;
mod validation;

pub use buffer::*;
pub use validation::*;
