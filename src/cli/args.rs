use crate::core::CsvReader;
use crate::types::Format;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Stream a delimiter-separated file with chunked processing
#[derive(Parser, Debug)]
#[command(name = "chunked-csv")]
#[command(about = "Stream a delimiter-separated file with chunked processing", long_about = None)]
pub struct CliArgs {
    /// Input file path
    #[arg(value_name = "INPUT", help = "Path to the input file")]
    pub input_file: PathBuf,

    /// What to do with the input
    #[arg(
        long = "mode",
        value_name = "MODE",
        default_value = "rows",
        help = "Operation: 'count' rows, print the 'header', or stream 'rows'"
    )]
    pub mode: Mode,

    /// Field delimiter
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value = ",",
        value_parser = parse_single_byte,
        help = "Field delimiter (single ASCII character)"
    )]
    pub delimiter: u8,

    /// Field enclosure
    #[arg(
        long = "enclosure",
        value_name = "CHAR",
        default_value = "\"",
        value_parser = parse_single_byte,
        help = "Field enclosure (single ASCII character)"
    )]
    pub enclosure: u8,

    /// Escape character inside enclosed fields
    #[arg(
        long = "escape",
        value_name = "CHAR",
        default_value = "\\",
        value_parser = parse_single_byte,
        help = "Escape character (single ASCII character)"
    )]
    pub escape: u8,

    /// Maximum physical line length in bytes
    #[arg(
        long = "max-line-length",
        value_name = "BYTES",
        default_value_t = Format::DEFAULT_MAX_LINE_LENGTH,
        help = "Maximum physical line length in bytes"
    )]
    pub max_line_length: usize,

    /// Rows per chunk; enables progress reporting on stderr in rows mode
    #[arg(
        long = "chunk-size",
        value_name = "ROWS",
        help = "Rows per chunk; enables progress reporting on stderr"
    )]
    pub chunk_size: Option<u64>,

    /// Treat the first line as data instead of a header
    #[arg(long = "no-header", help = "Treat the first line as data, not a header")]
    pub no_header: bool,

    /// Stop after this many rows (rows mode only)
    #[arg(
        long = "limit",
        value_name = "ROWS",
        help = "Stop after this many rows (rows mode only)"
    )]
    pub limit: Option<u64>,
}

/// Available operations for the input file
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Count,
    Header,
    Rows,
}

/// Parse a single-byte option value such as the delimiter
fn parse_single_byte(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(format!(
            "expected a single ASCII character, got '{}'",
            value
        )),
    }
}

impl CliArgs {
    /// Create a configured CsvReader from the CLI arguments
    ///
    /// Applies every format option, the header flag, and the chunk size (if
    /// given) to a reader for the input file. The reader is returned closed;
    /// the first operation opens it.
    pub fn to_reader(&self) -> CsvReader {
        let mut reader = CsvReader::new(&self.input_file)
            .with_delimiter(self.delimiter)
            .with_enclosure(self.enclosure)
            .with_escape(self.escape)
            .with_max_line_length(self.max_line_length)
            .with_has_header(!self.no_header);
        if let Some(chunk_size) = self.chunk_size {
            reader = reader.with_chunk_size(chunk_size);
        }
        reader
    }
}
