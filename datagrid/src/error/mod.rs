//! Error types

mod config;
mod source;

pub use config::*;
pub use source::*;
