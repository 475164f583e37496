//! Chunked row processing
//!
//! This module provides the ChunkProcessor that drives a [`CsvReader`]'s row
//! iteration through user callbacks: one per row, and optionally one per
//! chunk of `chunk_size` rows for periodic side effects (progress reporting,
//! batched writes).
//!
//! # Abort semantics
//!
//! The row callback returns a bool: `true` to continue, `false` to stop.
//! An abort is cooperative and immediate; once the callback returns `false`
//! no further callback of either kind runs, including the final
//! partial-chunk notification. Aborting is not an error, and tokenization
//! errors are not an abort: they propagate as `Err` out of the processor.

use crate::core::reader::CsvReader;
use crate::types::{CsvError, Row};

/// Result of a processing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// All rows were processed; carries the total number of rows
    Completed(u64),

    /// The row callback requested a stop before the end of data
    Aborted,
}

impl ProcessOutcome {
    /// Whether the run was stopped by the row callback
    pub fn is_aborted(&self) -> bool {
        matches!(self, ProcessOutcome::Aborted)
    }

    /// The total row count for a completed run, `None` if aborted
    pub fn rows_processed(&self) -> Option<u64> {
        match self {
            ProcessOutcome::Completed(count) => Some(*count),
            ProcessOutcome::Aborted => None,
        }
    }
}

/// Drives a reader's rows through per-row and per-chunk callbacks
///
/// Stateless; the chunk size comes from the reader's configuration. One
/// processor value can serve any number of runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkProcessor;

impl ChunkProcessor {
    /// Create a new ChunkProcessor
    pub fn new() -> Self {
        ChunkProcessor
    }

    /// Process every row through `on_row`
    ///
    /// `on_row` receives each row with its 1-based number and returns
    /// whether to continue. Returns `ProcessOutcome::Completed` with the
    /// total row count, or `ProcessOutcome::Aborted` if `on_row` stopped
    /// the run.
    ///
    /// # Errors
    ///
    /// Propagates any error raised while opening or iterating the reader.
    pub fn process<F>(
        &self,
        reader: &mut CsvReader,
        mut on_row: F,
    ) -> Result<ProcessOutcome, CsvError>
    where
        F: FnMut(&Row, u64) -> bool,
    {
        self.run(reader, &mut on_row, None)
    }

    /// Process every row through `on_row` with chunk notifications
    ///
    /// In addition to the per-row callback, `on_chunk` is invoked with the
    /// current row number after every `chunk_size` rows, and once more after
    /// normal completion when the final chunk is partial. An aborted run
    /// receives no further notifications, final or otherwise.
    ///
    /// # Errors
    ///
    /// Propagates any error raised while opening or iterating the reader.
    pub fn process_chunked<F, G>(
        &self,
        reader: &mut CsvReader,
        mut on_row: F,
        mut on_chunk: G,
    ) -> Result<ProcessOutcome, CsvError>
    where
        F: FnMut(&Row, u64) -> bool,
        G: FnMut(u64),
    {
        self.run(reader, &mut on_row, Some(&mut on_chunk))
    }

    fn run(
        &self,
        reader: &mut CsvReader,
        on_row: &mut dyn FnMut(&Row, u64) -> bool,
        mut on_chunk: Option<&mut dyn FnMut(u64)>,
    ) -> Result<ProcessOutcome, CsvError> {
        let chunk_size = reader.chunk_size();
        let mut rows = reader.rows()?;
        let mut last = 0;

        let outcome = loop {
            match rows.next() {
                Some(item) => {
                    let (number, row) = item?;
                    last = number;
                    if !on_row(&row, number) {
                        break ProcessOutcome::Aborted;
                    }
                    if number % chunk_size == 0 {
                        if let Some(on_chunk) = &mut on_chunk {
                            on_chunk(number);
                        }
                    }
                }
                None => break ProcessOutcome::Completed(rows.total().unwrap_or(last)),
            }
        };

        // Flush the trailing partial chunk, but never after an abort. An
        // empty source leaves `last` at 0, which is a chunk boundary, so no
        // spurious notification fires.
        if let ProcessOutcome::Completed(total) = outcome {
            if total % chunk_size != 0 {
                if let Some(on_chunk) = on_chunk {
                    on_chunk(total);
                }
            }
        }

        Ok(outcome)
    }
}
