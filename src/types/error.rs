//! Error types for the chunked CSV reader
//!
//! This module defines all error types that can occur while reading a
//! delimiter-separated file. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **File Errors**: File not found at the configured path
//! - **State Errors**: Reader used in the wrong lifecycle state (double open,
//!   read while closed)
//! - **Read Errors**: Tokenization or data-integrity failures, carrying the
//!   1-based line number where reading stopped
//! - **I/O Errors**: Any other operating-system failure (permissions, seek
//!   failures, etc.)

use std::path::Path;
use thiserror::Error;

/// Main error type for the chunked CSV reader
///
/// This enum represents all possible errors that can occur while opening,
/// tokenizing, or iterating a delimiter-separated file. Each variant includes
/// relevant context to help diagnose and resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsvError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents reading from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// Reader was used in an invalid lifecycle state
    ///
    /// Raised when `open()` is called on an already-open reader, or when a
    /// read is attempted while the reader is closed. This indicates a caller
    /// bug and is fatal to the current operation.
    #[error("Invalid reader state: {message}")]
    InvalidState {
        /// Description of the state violation
        message: String,
    },

    /// Reading or tokenizing a line failed
    ///
    /// Raised when a physical line exceeds the configured maximum length,
    /// when a field is not valid UTF-8, or when a data row's field count
    /// does not match the header. Iteration stops at the offending line.
    #[error("Read error at line {line}: {message}")]
    ReadLine {
        /// 1-based line number where reading stopped
        line: u64,
        /// Description of the read failure
        message: String,
    },

    /// I/O error occurred while reading or seeking
    ///
    /// This is typically a fatal error (file permissions, broken seek, etc.).
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to CsvError
impl From<std::io::Error> for CsvError {
    fn from(error: std::io::Error) -> Self {
        CsvError::Io {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl CsvError {
    /// Create a FileNotFound error from a path
    pub fn file_not_found(path: &Path) -> Self {
        CsvError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create an InvalidState error
    pub fn invalid_state(message: &str) -> Self {
        CsvError::InvalidState {
            message: message.to_string(),
        }
    }

    /// Create a ReadLine error at the given 1-based line number
    pub fn read_line(line: u64, message: &str) -> Self {
        CsvError::ReadLine {
            line,
            message: message.to_string(),
        }
    }

    /// The 1-based line number this error occurred at, if it carries one
    pub fn line(&self) -> Option<u64> {
        match self {
            CsvError::ReadLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}
