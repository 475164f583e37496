//! Byte-source handle with line-aware positioning
//!
//! Wraps the backing file in a buffered reader and exposes the lifecycle
//! primitives the streaming reader needs: open, read one physical line,
//! report/restore the cursor position, rewind, and end-of-data detection.
//!
//! # Design
//!
//! Open-ness is ownership: constructing a `SourceHandle` opens the file and
//! dropping it closes the file, so the owning reader models open/closed as
//! `Option<SourceHandle>` and release happens on every exit path.
//!
//! Physical lines are byte sequences up to and including the `\n` terminator.
//! The handle counts lines (1-based) as it reads, and a [`Position`] captures
//! both the byte offset and the line counter so a seek restores line
//! accounting along with the cursor.

use crate::types::CsvError;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Seek, SeekFrom};
use std::path::Path;

/// A saved cursor position within the source
///
/// Captures the byte offset together with the 1-based number of the next
/// line to be read, so that seeking back restores line numbering in read
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    byte: u64,
    line: u64,
}

impl Position {
    /// The position at the start of the source
    pub fn start() -> Self {
        Position { byte: 0, line: 1 }
    }

    /// Byte offset from the start of the source
    pub fn byte(&self) -> u64 {
        self.byte
    }

    /// 1-based number of the next line to be read at this position
    pub fn line(&self) -> u64 {
        self.line
    }
}

/// An open handle on the backing file
///
/// Owns the file for its lifetime; dropping the handle closes the file.
#[derive(Debug)]
pub struct SourceHandle {
    inner: BufReader<File>,
    line: u64,
}

impl SourceHandle {
    /// Open the file at `path` for reading
    ///
    /// # Errors
    ///
    /// Returns `CsvError::FileNotFound` when the path does not exist, and
    /// `CsvError::Io` for any other operating-system failure.
    pub fn open(path: &Path) -> Result<Self, CsvError> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                CsvError::file_not_found(path)
            } else {
                CsvError::from(e)
            }
        })?;

        Ok(SourceHandle {
            inner: BufReader::new(file),
            line: 1,
        })
    }

    /// 1-based number of the next line to be read
    pub fn line(&self) -> u64 {
        self.line
    }

    /// The current cursor position
    pub fn position(&mut self) -> Result<Position, CsvError> {
        let byte = self.inner.stream_position()?;
        Ok(Position {
            byte,
            line: self.line,
        })
    }

    /// Move the cursor to a previously captured position
    pub fn seek(&mut self, position: &Position) -> Result<(), CsvError> {
        self.inner.seek(SeekFrom::Start(position.byte))?;
        self.line = position.line;
        Ok(())
    }

    /// Move the cursor back to the start of the source
    pub fn rewind(&mut self) -> Result<(), CsvError> {
        self.seek(&Position::start())
    }

    /// Whether the cursor is at the end of the source
    pub fn at_end(&mut self) -> Result<bool, CsvError> {
        Ok(self.inner.fill_buf()?.is_empty())
    }

    /// Read one physical line into `buf`, terminator included
    ///
    /// Appends to `buf` and returns the number of bytes read. Returns 0 at
    /// end of data. The final line of a source without a trailing newline is
    /// returned without a terminator.
    ///
    /// # Errors
    ///
    /// Returns `CsvError::ReadLine` carrying the current 1-based line number
    /// when the line grows beyond `max` bytes (terminator included), and
    /// `CsvError::Io` on operating-system failures.
    pub fn read_physical_line(
        &mut self,
        buf: &mut Vec<u8>,
        max: usize,
    ) -> Result<usize, CsvError> {
        let start = buf.len();
        loop {
            let (found, used) = {
                let available = match self.inner.fill_buf() {
                    Ok(chunk) => chunk,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                };
                match available.iter().position(|&b| b == b'\n') {
                    Some(i) => {
                        buf.extend_from_slice(&available[..=i]);
                        (true, i + 1)
                    }
                    None => {
                        buf.extend_from_slice(available);
                        (false, available.len())
                    }
                }
            };
            self.inner.consume(used);

            if buf.len() - start > max {
                return Err(CsvError::ReadLine {
                    line: self.line,
                    message: format!("line exceeds maximum length of {} bytes", max),
                });
            }

            // A full line was read, or the source ended mid-line.
            if found || used == 0 {
                let read = buf.len() - start;
                if read > 0 {
                    self.line += 1;
                }
                return Ok(read);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn read_line(handle: &mut SourceHandle) -> Vec<u8> {
        let mut buf = Vec::new();
        handle
            .read_physical_line(&mut buf, 1024)
            .expect("Failed to read line");
        buf
    }

    #[test]
    fn test_open_missing_file_is_file_not_found() {
        let result = SourceHandle::open(Path::new("does_not_exist.csv"));
        assert!(matches!(result, Err(CsvError::FileNotFound { .. })));
        let error = result.unwrap_err();
        assert!(error.to_string().contains("does_not_exist.csv"));
    }

    #[test]
    fn test_reads_lines_with_terminators() {
        let file = create_temp_csv("a,b,c\nd,e,f\n");
        let mut handle = SourceHandle::open(file.path()).unwrap();

        assert_eq!(read_line(&mut handle), b"a,b,c\n");
        assert_eq!(read_line(&mut handle), b"d,e,f\n");
        assert_eq!(read_line(&mut handle), b"");
    }

    #[test]
    fn test_final_line_without_terminator() {
        let file = create_temp_csv("a,b,c\nd,e,f");
        let mut handle = SourceHandle::open(file.path()).unwrap();

        assert_eq!(read_line(&mut handle), b"a,b,c\n");
        assert_eq!(read_line(&mut handle), b"d,e,f");
        assert_eq!(read_line(&mut handle), b"");
    }

    #[test]
    fn test_line_counter_advances_per_line() {
        let file = create_temp_csv("one\ntwo\nthree\n");
        let mut handle = SourceHandle::open(file.path()).unwrap();

        assert_eq!(handle.line(), 1);
        read_line(&mut handle);
        assert_eq!(handle.line(), 2);
        read_line(&mut handle);
        assert_eq!(handle.line(), 3);

        // Reading past the end leaves the counter untouched
        read_line(&mut handle);
        read_line(&mut handle);
        assert_eq!(handle.line(), 4);
    }

    #[test]
    fn test_line_exceeding_max_length_errors() {
        let file = create_temp_csv("0123456789abcdef\nshort\n");
        let mut handle = SourceHandle::open(file.path()).unwrap();

        let mut buf = Vec::new();
        let result = handle.read_physical_line(&mut buf, 8);
        assert!(matches!(result, Err(CsvError::ReadLine { line: 1, .. })));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("maximum length of 8 bytes"));
    }

    #[test]
    fn test_line_of_exactly_max_length_is_allowed() {
        // 7 bytes of content plus the terminator is exactly 8
        let file = create_temp_csv("0123456\n");
        let mut handle = SourceHandle::open(file.path()).unwrap();

        let mut buf = Vec::new();
        let read = handle.read_physical_line(&mut buf, 8).unwrap();
        assert_eq!(read, 8);
        assert_eq!(buf, b"0123456\n");
    }

    #[test]
    fn test_position_and_seek_round_trip() {
        let file = create_temp_csv("a,b,c\nd,e,f\ng,h,i\n");
        let mut handle = SourceHandle::open(file.path()).unwrap();

        read_line(&mut handle);
        let position = handle.position().unwrap();
        assert_eq!(position.byte(), 6);
        assert_eq!(position.line(), 2);

        read_line(&mut handle);
        read_line(&mut handle);
        assert_eq!(handle.line(), 4);

        handle.seek(&position).unwrap();
        assert_eq!(handle.line(), 2);
        assert_eq!(read_line(&mut handle), b"d,e,f\n");
    }

    #[test]
    fn test_rewind_returns_to_start() {
        let file = create_temp_csv("a,b,c\nd,e,f\n");
        let mut handle = SourceHandle::open(file.path()).unwrap();

        read_line(&mut handle);
        read_line(&mut handle);
        handle.rewind().unwrap();

        assert_eq!(handle.line(), 1);
        assert_eq!(read_line(&mut handle), b"a,b,c\n");
    }

    #[test]
    fn test_at_end_detection() {
        let file = create_temp_csv("a,b,c\n");
        let mut handle = SourceHandle::open(file.path()).unwrap();

        assert!(!handle.at_end().unwrap());
        read_line(&mut handle);
        assert!(handle.at_end().unwrap());

        handle.rewind().unwrap();
        assert!(!handle.at_end().unwrap());
    }

    #[test]
    fn test_at_end_on_empty_file() {
        let file = create_temp_csv("");
        let mut handle = SourceHandle::open(file.path()).unwrap();
        assert!(handle.at_end().unwrap());
    }
}
