//! Tokenization format options
//!
//! Bundles the per-reader settings that control how physical lines are split
//! into fields: delimiter, enclosure, escape, and the maximum physical line
//! length. A `Format` is cheap to copy and is consumed by the tokenizer at
//! construction time.

/// Tokenization settings for a delimiter-separated source
///
/// The delimiter, enclosure, and escape are single ASCII bytes, matching the
/// single-byte wire model of the underlying parser. `max_line_length` must
/// exceed the longest physical line in the file (terminator included) or
/// tokenization fails with a read error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Byte that separates fields within a row
    pub delimiter: u8,

    /// Byte that encloses fields containing the delimiter or line breaks
    pub enclosure: u8,

    /// Byte that escapes the enclosure (and itself) inside an enclosed field
    pub escape: u8,

    /// Maximum length of one physical line in bytes, terminator included
    pub max_line_length: usize,
}

impl Format {
    /// Default field delimiter (`,`)
    pub const DEFAULT_DELIMITER: u8 = b',';

    /// Default field enclosure (`"`)
    pub const DEFAULT_ENCLOSURE: u8 = b'"';

    /// Default escape byte (`\`)
    pub const DEFAULT_ESCAPE: u8 = b'\\';

    /// Default maximum physical line length in bytes
    pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;
}

impl Default for Format {
    fn default() -> Self {
        Format {
            delimiter: Self::DEFAULT_DELIMITER,
            enclosure: Self::DEFAULT_ENCLOSURE,
            escape: Self::DEFAULT_ESCAPE,
            max_line_length: Self::DEFAULT_MAX_LINE_LENGTH,
        }
    }
}
