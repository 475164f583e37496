//! Types module
//!
//! Contains core data structures used throughout the crate.
//! This module organizes types into logical submodules:
//! - `error`: Error types for the reader
//! - `format`: Tokenization format options
//! - `row`: Row values yielded during iteration

pub mod error;
pub mod format;
pub mod row;

pub use error::CsvError;
pub use format::Format;
pub use row::Row;
