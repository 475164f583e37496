//! Stateful streaming reader
//!
//! This module provides the CsvReader that owns the source handle and
//! tokenizer and layers the stateful semantics on top: header resolution
//! with position restore, lazy row iteration with 1-based numbering, row
//! counting, and result caching with single-open lifecycle rules.
//!
//! # Lifecycle
//!
//! A reader is created closed. `open()` transitions it to open and fails if
//! it is already open; `close()` always succeeds and releases the file.
//! `header()`, `rows()`, and `count()` auto-open a closed reader. The reader
//! may be reopened after closing; cached header and count persist across a
//! reopen because they describe the file's content.
//!
//! # Caching
//!
//! The header is read at most once per configuration and the row count is
//! computed by draining the source at most once. Setters that change
//! tokenization behavior invalidate both caches (and drop an open handle)
//! so the next operation answers under the new settings.

use crate::io::{LineTokenizer, SourceHandle};
use crate::types::{CsvError, Format, Row};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Streaming reader for a delimiter-separated file
///
/// Configured with consuming `with_*` setters, then driven through
/// [`header`](CsvReader::header), [`rows`](CsvReader::rows), and
/// [`count`](CsvReader::count). All row access is lazy; at no point is the
/// whole file held in memory.
///
/// # Examples
///
/// ```no_run
/// use chunked_csv::CsvReader;
///
/// let mut reader = CsvReader::new("people.csv").with_delimiter(b';');
/// for item in reader.rows().unwrap() {
///     let (number, row) = item.unwrap();
///     println!("{}: {:?}", number, row.get_by_name("name"));
/// }
/// ```
#[derive(Debug)]
pub struct CsvReader {
    path: PathBuf,
    format: Format,
    has_header: bool,
    chunk_size: u64,
    tokenizer: LineTokenizer,
    handle: Option<SourceHandle>,
    header: Option<Vec<String>>,
    row_count: Option<u64>,
}

impl CsvReader {
    /// Default number of rows per chunk for chunked processing
    pub const DEFAULT_CHUNK_SIZE: u64 = 1000;

    /// Create a reader for the file at `path`
    ///
    /// The reader starts closed, with default format options (comma
    /// delimiter, double-quote enclosure, backslash escape, 1024-byte line
    /// limit), a header expected on the first line, and the default chunk
    /// size. The file is not touched until the first operation needs it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let format = Format::default();
        CsvReader {
            path: path.into(),
            tokenizer: LineTokenizer::new(&format),
            format,
            has_header: true,
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            handle: None,
            header: None,
            row_count: None,
        }
    }

    /// Set the field delimiter
    ///
    /// Invalidates the cached header and count and closes an open handle.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.format.delimiter = delimiter;
        self.apply_format();
        self
    }

    /// Set the field enclosure
    ///
    /// Invalidates the cached header and count and closes an open handle.
    pub fn with_enclosure(mut self, enclosure: u8) -> Self {
        self.format.enclosure = enclosure;
        self.apply_format();
        self
    }

    /// Set the escape byte used inside enclosed fields
    ///
    /// Invalidates the cached header and count and closes an open handle.
    pub fn with_escape(mut self, escape: u8) -> Self {
        self.format.escape = escape;
        self.apply_format();
        self
    }

    /// Set the maximum physical line length in bytes
    ///
    /// Invalidates the cached header and count and closes an open handle.
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.format.max_line_length = max_line_length;
        self.apply_format();
        self
    }

    /// Set whether the first line is a header
    ///
    /// Invalidates the cached header and count, since both depend on which
    /// lines count as data.
    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self.header = None;
        self.row_count = None;
        self
    }

    /// Set the number of rows per chunk for chunked processing
    ///
    /// Clamped to at least 1. Does not affect caches or the open handle.
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    // Rebuild the tokenizer and discard everything derived from the old
    // format: cached header, cached count, and the open handle.
    fn apply_format(&mut self) {
        self.tokenizer = LineTokenizer::new(&self.format);
        self.header = None;
        self.row_count = None;
        self.handle = None;
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The field delimiter
    pub fn delimiter(&self) -> u8 {
        self.format.delimiter
    }

    /// The field enclosure
    pub fn enclosure(&self) -> u8 {
        self.format.enclosure
    }

    /// The escape byte
    pub fn escape(&self) -> u8 {
        self.format.escape
    }

    /// The maximum physical line length in bytes
    pub fn max_line_length(&self) -> usize {
        self.format.max_line_length
    }

    /// Whether the first line is treated as a header
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// The number of rows per chunk for chunked processing
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Whether the backing file is currently open
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Open the backing file
    ///
    /// Reading operations open the file on demand; calling this up front
    /// validates the path eagerly.
    ///
    /// # Errors
    ///
    /// Returns `CsvError::InvalidState` if the reader is already open, and
    /// `CsvError::FileNotFound` if the path does not exist.
    pub fn open(&mut self) -> Result<&mut Self, CsvError> {
        if self.handle.is_some() {
            return Err(CsvError::InvalidState {
                message: format!("\"{}\" is already open", self.path.display()),
            });
        }
        self.handle = Some(SourceHandle::open(&self.path)?);
        Ok(self)
    }

    /// Close the backing file
    ///
    /// A no-op if the reader is already closed. Cached header and count are
    /// kept.
    pub fn close(&mut self) -> &mut Self {
        self.handle = None;
        self
    }

    // Open on demand. Unlike open(), calling this while open is fine.
    fn ensure_open(&mut self) -> Result<&mut SourceHandle, CsvError> {
        if self.handle.is_none() {
            self.handle = Some(SourceHandle::open(&self.path)?);
        }
        self.handle.as_mut().ok_or_else(|| not_open(&self.path))
    }

    // Tokenize the next row from the current cursor position.
    fn read_line(&mut self) -> Result<Option<Vec<String>>, CsvError> {
        let handle = match self.handle.as_mut() {
            Some(handle) => handle,
            None => return Err(not_open(&self.path)),
        };
        self.tokenizer.next_row(handle)
    }

    /// The header fields, reading them from the first line if needed
    ///
    /// Returns `None` without touching the file when the reader is
    /// configured without a header. Otherwise the header is read once and
    /// cached: the reader auto-opens if closed, records the cursor, rewinds
    /// to the start, and tokenizes one row. With `rewind` set the cursor is
    /// then restored to where it was; without it the cursor is left just
    /// after the header line. Subsequent calls return the cache and leave
    /// the cursor alone.
    ///
    /// Also returns `None` (leaving the reader open) when the file is empty.
    ///
    /// # Errors
    ///
    /// Returns `CsvError::FileNotFound` if auto-open fails and
    /// `CsvError::ReadLine` if the header line cannot be tokenized.
    pub fn header(&mut self, rewind: bool) -> Result<Option<Vec<String>>, CsvError> {
        if !self.has_header {
            return Ok(None);
        }
        if self.header.is_none() {
            let position = {
                let handle = self.ensure_open()?;
                let position = handle.position()?;
                handle.rewind()?;
                position
            };
            self.header = self.read_line()?;
            if rewind {
                self.ensure_open()?.seek(&position)?;
            }
        }
        Ok(self.header.clone())
    }

    /// Iterate the data rows lazily
    ///
    /// Auto-opens if closed. With a header configured, the header is
    /// resolved first (without restoring the cursor, so iteration starts at
    /// the line after it) and every yielded [`Row`] carries the header for
    /// by-name access; a data row whose field count differs from the header
    /// ends iteration with a `ReadLine` error naming that row. Without a
    /// header, the cursor rewinds to the start and rows are positional.
    ///
    /// Items are `(row number, row)` with numbers counting data rows from 1.
    /// Iteration stops at end of data or at the first blank line. After a
    /// clean exhaustion [`Rows::total`] reports the number of rows yielded.
    ///
    /// # Errors
    ///
    /// Returns `CsvError::FileNotFound` if auto-open fails; tokenization
    /// failures surface as `Err` items during iteration.
    pub fn rows(&mut self) -> Result<Rows<'_>, CsvError> {
        self.ensure_open()?;
        let header = if self.has_header {
            self.header(false)?;
            self.header.clone().map(Arc::new)
        } else {
            self.ensure_open()?.rewind()?;
            None
        };
        Ok(Rows {
            reader: self,
            header,
            line_count: 0,
            total: None,
            done: false,
        })
    }

    /// Number of data rows, excluding the header line
    ///
    /// Computed by draining [`rows`](CsvReader::rows) once and cached for
    /// the lifetime of the reader (configuration changes invalidate the
    /// cache). The reader is left open after counting.
    ///
    /// # Errors
    ///
    /// Propagates any error the underlying iteration raises; errors are not
    /// cached.
    pub fn count(&mut self) -> Result<u64, CsvError> {
        if let Some(count) = self.row_count {
            return Ok(count);
        }
        let mut count = 0;
        for item in self.rows()? {
            item?;
            count += 1;
        }
        self.row_count = Some(count);
        Ok(count)
    }
}

/// Lazy iterator over the data rows of a [`CsvReader`]
///
/// Yields `Result<(u64, Row)>` with 1-based row numbers. The iterator is
/// fused: after the first error or the end of data it keeps returning
/// `None`. It borrows the reader mutably, so the reader cannot be touched
/// until iteration is dropped.
pub struct Rows<'a> {
    reader: &'a mut CsvReader,
    header: Option<Arc<Vec<String>>>,
    line_count: u64,
    total: Option<u64>,
    done: bool,
}

impl Rows<'_> {
    /// Total number of rows yielded, available after clean exhaustion
    ///
    /// `None` while iteration is still in progress or when it ended with an
    /// error.
    pub fn total(&self) -> Option<u64> {
        self.total
    }
}

impl Iterator for Rows<'_> {
    type Item = Result<(u64, Row), CsvError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_line() {
            Ok(Some(fields)) => {
                if let Some(header) = &self.header {
                    if header.len() != fields.len() {
                        self.done = true;
                        return Some(Err(CsvError::ReadLine {
                            line: self.line_count + 1,
                            message: format!(
                                "header has {} fields but row has {}",
                                header.len(),
                                fields.len()
                            ),
                        }));
                    }
                }
                self.line_count += 1;
                Some(Ok((self.line_count, Row::new(fields, self.header.clone()))))
            }
            Ok(None) => {
                self.done = true;
                self.total = Some(self.line_count);
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

fn not_open(path: &Path) -> CsvError {
    CsvError::InvalidState {
        message: format!("\"{}\" is not open", path.display()),
    }
}
