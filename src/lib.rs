//! Chunked CSV Library
//!
//! # Overview
//!
//! This library provides a streaming reader for delimiter-separated files:
//! rows are produced lazily from a buffered file handle, with optional
//! header-based field naming and chunked batch processing on top.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (CsvError, Format, Row)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Stateful streaming logic:
//!   - [`core::reader`] - Header resolution, lazy row iteration, counting,
//!     caching, and the open/close lifecycle
//!   - [`core::processor`] - Chunked processing with per-row and per-chunk
//!     callbacks and cooperative abort
//! - [`io`] - Backing file handle and line tokenization
//!
//! # Reading model
//!
//! A [`CsvReader`] is configured with fluent `with_*` setters, then asked
//! for the `header()`, a lazy `rows()` iterator, or a cached `count()`. All
//! reads are streaming; memory use is per-row, not per-file. Data rows are
//! numbered from 1, fields are whitespace-trimmed, and when a header is
//! configured every row can be read by column name in header order.
//!
//! # Failure model
//!
//! All failures surface as [`CsvError`] values: a missing file, a lifecycle
//! violation (double open, read while closed), or a read error carrying the
//! 1-based line number (over-long line, invalid UTF-8, header/row field
//! count mismatch). Nothing is logged or swallowed inside the library.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{ChunkProcessor, CsvReader, ProcessOutcome, Rows};
pub use crate::io::{LineTokenizer, Position, SourceHandle};
pub use crate::types::{CsvError, Format, Row};
