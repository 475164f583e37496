//! Benchmark suite for streaming read throughput
//!
//! Measures counting and chunked processing over generated fixtures using
//! the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! # Benchmark Fixtures
//!
//! Fixtures are generated once into temporary files:
//! - small: 100 data rows under a three-column header
//! - large: 10,000 data rows under a three-column header

use chunked_csv::{ChunkProcessor, CsvReader};
use std::io::Write;
use std::sync::OnceLock;
use tempfile::NamedTempFile;

fn main() {
    divan::main();
}

/// Generate a fixture file with the given number of data rows
fn generate_fixture(rows: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create fixture file");
    writeln!(file, "field1,field2,field3").expect("Failed to write fixture");
    for i in 0..rows {
        writeln!(file, "alpha{},beta{},gamma{}", i, i, i).expect("Failed to write fixture");
    }
    file.flush().expect("Failed to flush fixture");
    file
}

fn small_fixture() -> &'static NamedTempFile {
    static SMALL: OnceLock<NamedTempFile> = OnceLock::new();
    SMALL.get_or_init(|| generate_fixture(100))
}

fn large_fixture() -> &'static NamedTempFile {
    static LARGE: OnceLock<NamedTempFile> = OnceLock::new();
    LARGE.get_or_init(|| generate_fixture(10_000))
}

/// Benchmark counting rows in the small fixture (100 rows)
#[divan::bench]
fn count_small() {
    let mut reader = CsvReader::new(small_fixture().path());
    reader.count().expect("Counting failed");
}

/// Benchmark counting rows in the large fixture (10,000 rows)
#[divan::bench]
fn count_large() {
    let mut reader = CsvReader::new(large_fixture().path());
    reader.count().expect("Counting failed");
}

/// Benchmark per-row processing over the small fixture (100 rows)
#[divan::bench]
fn process_small() {
    let mut reader = CsvReader::new(small_fixture().path());
    let processor = ChunkProcessor::new();

    processor
        .process(&mut reader, |row, _| !row.is_empty())
        .expect("Processing failed");
}

/// Benchmark per-row processing over the large fixture (10,000 rows)
#[divan::bench]
fn process_large() {
    let mut reader = CsvReader::new(large_fixture().path());
    let processor = ChunkProcessor::new();

    processor
        .process(&mut reader, |row, _| !row.is_empty())
        .expect("Processing failed");
}

/// Benchmark chunked processing with progress callbacks (10,000 rows)
#[divan::bench]
fn process_chunked_large() {
    let mut reader = CsvReader::new(large_fixture().path()).with_chunk_size(500);
    let processor = ChunkProcessor::new();

    let mut boundaries = 0u64;
    processor
        .process_chunked(&mut reader, |_, _| true, |_| boundaries += 1)
        .expect("Processing failed");
    divan::black_box(boundaries);
}
