//! Line tokenizer built on `csv_core`
//!
//! Converts physical lines pulled from a [`SourceHandle`] into rows of
//! trimmed string fields. Enclosure and escape handling follow common
//! delimiter-separated-text conventions: an enclosed field may embed the
//! delimiter and line breaks, the escape byte escapes the enclosure (and
//! itself) inside an enclosed field, and a doubled enclosure is also
//! accepted.
//!
//! # Design
//!
//! The tokenizer reads one physical line at a time and feeds it to a
//! re-entrant `csv_core::Reader`. When the parser reports that its input ran
//! out before the record ended (an enclosed field spanning lines), the next
//! physical line is pulled and parsing continues, so a record may consume
//! several physical lines while the source is still read line-by-line under
//! the configured length cap.
//!
//! A physical line that is completely blank at the start of a record is
//! treated the same as end of data: iteration stops rather than yielding a
//! blank row. Blank lines inside an enclosed field are not affected; they are
//! consumed as field content during record continuation.

use crate::io::source::SourceHandle;
use crate::types::{CsvError, Format};
use csv_core::{ReadRecordResult, Reader, ReaderBuilder};

/// Splits physical lines into rows of trimmed fields
///
/// Holds the parser configured from a [`Format`]; the parser is reset at the
/// start of every record, so one tokenizer serves the whole life of a reader
/// session.
#[derive(Debug)]
pub struct LineTokenizer {
    core: Reader,
    format: Format,
}

impl LineTokenizer {
    /// Build a tokenizer for the given format options
    pub fn new(format: &Format) -> Self {
        LineTokenizer {
            core: build_parser(format),
            format: *format,
        }
    }

    /// Read the next row from `handle`
    ///
    /// Returns `Ok(None)` when the source is exhausted or the next physical
    /// line is blank.
    ///
    /// # Errors
    ///
    /// Returns `CsvError::ReadLine` when a physical line exceeds the
    /// configured maximum length or a field is not valid UTF-8.
    pub fn next_row(
        &mut self,
        handle: &mut SourceHandle,
    ) -> Result<Option<Vec<String>>, CsvError> {
        let at_line = handle.line();
        let max = self.format.max_line_length;

        let mut line = Vec::new();
        if handle.read_physical_line(&mut line, max)? == 0 {
            return Ok(None);
        }
        if is_blank(&line) {
            return Ok(None);
        }

        self.core.reset();
        let mut output = vec![0u8; max.max(line.len())];
        let mut bounds = vec![0usize; 32];
        let mut written = 0;
        let mut field_count = 0;
        let mut consumed = 0;

        loop {
            let (result, nin, nout, nend) = self.core.read_record(
                &line[consumed..],
                &mut output[written..],
                &mut bounds[field_count..],
            );
            // Field boundaries come back as absolute offsets into the
            // record's accumulated output, so only the counters move.
            consumed += nin;
            written += nout;
            field_count += nend;

            match result {
                ReadRecordResult::InputEmpty => {
                    // An enclosed field spans physical lines; pull the next
                    // one. A zero-byte read leaves the input empty, which
                    // tells the parser to finalize the record in progress.
                    line.clear();
                    consumed = 0;
                    if let Err(e) = handle.read_physical_line(&mut line, max) {
                        // The parser is mid-record here; replace it so the
                        // abandoned record cannot bleed into the next read.
                        self.core = build_parser(&self.format);
                        return Err(e);
                    }
                }
                ReadRecordResult::OutputFull => {
                    let grown = output.len() * 2;
                    output.resize(grown, 0);
                }
                ReadRecordResult::OutputEndsFull => {
                    let grown = bounds.len() * 2;
                    bounds.resize(grown, 0);
                }
                ReadRecordResult::Record | ReadRecordResult::End => break,
            }
        }

        let mut fields = Vec::with_capacity(field_count);
        let mut start = 0;
        for &end in &bounds[..field_count] {
            let field = std::str::from_utf8(&output[start..end]).map_err(|_| {
                CsvError::read_line(at_line, "field is not valid UTF-8")
            })?;
            fields.push(field.trim().to_string());
            start = end;
        }
        Ok(Some(fields))
    }
}

fn build_parser(format: &Format) -> Reader {
    ReaderBuilder::new()
        .delimiter(format.delimiter)
        .quote(format.enclosure)
        .escape(Some(format.escape))
        .build()
}

/// Whether a physical line carries no content besides its terminator
fn is_blank(line: &[u8]) -> bool {
    let stripped = line.strip_suffix(b"\n").unwrap_or(line);
    let stripped = stripped.strip_suffix(b"\r").unwrap_or(stripped);
    stripped.is_empty()
}
