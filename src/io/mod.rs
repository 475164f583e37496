//! I/O module
//!
//! Handles the backing byte source and line tokenization.
//!
//! # Components
//!
//! - `source` - File handle with line-aware positioning (open, read line,
//!   seek, rewind, end-of-data)
//! - `tokenizer` - Splits physical lines into rows of trimmed fields

pub mod source;
pub mod tokenizer;

pub use source::{Position, SourceHandle};
pub use tokenizer::LineTokenizer;
