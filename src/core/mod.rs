//! Core reading and processing module
//!
//! This module contains the stateful streaming components:
//! - `reader` - Stateful reader: header resolution, lazy row iteration,
//!   counting, caching, open/close lifecycle
//! - `processor` - Chunked processing with per-row and per-chunk callbacks

pub mod processor;
pub mod reader;

pub use processor::{ChunkProcessor, ProcessOutcome};
pub use reader::{CsvReader, Rows};
