//! Chunked CSV CLI
//!
//! Command-line interface for streaming delimiter-separated files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- data.csv
//! cargo run -- --mode count data.csv
//! cargo run -- --mode header data.csv
//! cargo run -- --delimiter ";" --no-header data.csv
//! cargo run -- --chunk-size 1000 --limit 5000 data.csv
//! ```
//!
//! In `rows` mode (the default) every data row is printed to stdout with its
//! 1-based row number. Passing `--chunk-size` additionally reports progress
//! to stderr after each chunk; `--limit` stops the stream after that many
//! rows. `count` prints the number of data rows and `header` prints the
//! header fields.
//!
//! # Exit Codes
//!
//! - 0: Success (including a stream stopped by --limit)
//! - 1: Error (missing file, unreadable line, field count mismatch, etc.)

use chunked_csv::cli::{self, Mode};
use chunked_csv::{ChunkProcessor, CsvError, CsvReader, ProcessOutcome, Row};
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    let mut reader = args.to_reader();

    let result = match args.mode {
        Mode::Count => run_count(&mut reader),
        Mode::Header => run_header(&mut reader),
        Mode::Rows => run_rows(&mut reader, args.chunk_size.is_some(), args.limit),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Print the number of data rows to stdout
fn run_count(reader: &mut CsvReader) -> Result<(), CsvError> {
    println!("{}", reader.count()?);
    Ok(())
}

/// Print the header fields to stdout, joined by the delimiter
fn run_header(reader: &mut CsvReader) -> Result<(), CsvError> {
    let delimiter = char::from(reader.delimiter());
    match reader.header(true)? {
        Some(header) => println!("{}", header.join(&delimiter.to_string())),
        None => eprintln!("No header line"),
    }
    Ok(())
}

/// Stream data rows to stdout, optionally with chunk progress on stderr
fn run_rows(
    reader: &mut CsvReader,
    report_chunks: bool,
    limit: Option<u64>,
) -> Result<(), CsvError> {
    let processor = ChunkProcessor::new();
    let separator = char::from(reader.delimiter()).to_string();

    let outcome = if report_chunks {
        processor.process_chunked(
            reader,
            |row, number| print_row(row, number, &separator, limit),
            |number| eprintln!("processed {} rows", number),
        )?
    } else {
        processor.process(reader, |row, number| print_row(row, number, &separator, limit))?
    };

    if report_chunks {
        match outcome {
            ProcessOutcome::Completed(total) => eprintln!("done: {} rows", total),
            ProcessOutcome::Aborted => eprintln!("stopped at row limit"),
        }
    }
    Ok(())
}

/// Print one row and report whether streaming should continue
fn print_row(row: &Row, number: u64, separator: &str, limit: Option<u64>) -> bool {
    println!("{}: {}", number, row.fields().join(separator));
    limit.map_or(true, |limit| number < limit)
}
