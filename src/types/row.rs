//! Row type yielded by the streaming reader
//!
//! A `Row` holds the trimmed field values of one data row. When the source
//! has a header, the row also carries a shared snapshot of the header so
//! fields can be looked up by column name in header order. The header is
//! reference-counted, so attaching it to every row costs one pointer clone
//! per row, not a copy of the header strings.

use std::ops::Index;
use std::sync::Arc;

/// One data row from a delimiter-separated source
///
/// Fields are stored in file order with surrounding whitespace already
/// trimmed. When a header is attached, its field count always matches the
/// row's field count (mismatches are rejected during iteration before a
/// `Row` is ever constructed).
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    fields: Vec<String>,
    header: Option<Arc<Vec<String>>>,
}

impl Row {
    /// Create a row from trimmed fields and an optional header snapshot
    pub(crate) fn new(fields: Vec<String>, header: Option<Arc<Vec<String>>>) -> Self {
        Row { fields, header }
    }

    /// The field values in file order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Consume the row, returning its field values
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Number of fields in this row
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether this row has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field value at the given 0-based position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Field value under the given header column name
    ///
    /// Returns `None` when the row has no header or the name is not one of
    /// its columns. With duplicate column names the first match wins.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        let header = self.header.as_deref()?;
        let index = header.iter().position(|column| column == name)?;
        self.get(index)
    }

    /// The header columns this row was read under, if any
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref().map(Vec::as_slice)
    }

    /// Iterate `(column name, field value)` pairs in header order
    ///
    /// Empty when the row has no header.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header
            .as_deref()
            .into_iter()
            .flatten()
            .zip(self.fields.iter())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl Index<usize> for Row {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.fields[index]
    }
}

impl Index<&str> for Row {
    type Output = str;

    fn index(&self, name: &str) -> &str {
        match self.get_by_name(name) {
            Some(value) => value,
            None => panic!("no column named {:?}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn named_row() -> Row {
        Row::new(
            strings(&["a", "b", "c"]),
            Some(Arc::new(strings(&["field1", "field2", "field3"]))),
        )
    }

    #[test]
    fn test_positional_access() {
        let row = Row::new(strings(&["a", "b", "c"]), None);
        assert_eq!(row.len(), 3);
        assert_eq!(row.get(0), Some("a"));
        assert_eq!(row.get(2), Some("c"));
        assert_eq!(row.get(3), None);
        assert_eq!(&row[1], "b");
    }

    #[test]
    fn test_access_by_name() {
        let row = named_row();
        assert_eq!(row.get_by_name("field1"), Some("a"));
        assert_eq!(row.get_by_name("field3"), Some("c"));
        assert_eq!(row.get_by_name("missing"), None);
        assert_eq!(&row["field2"], "b");
    }

    #[test]
    fn test_name_access_without_header() {
        let row = Row::new(strings(&["a", "b", "c"]), None);
        assert_eq!(row.get_by_name("field1"), None);
        assert!(row.header().is_none());
        assert_eq!(row.columns().count(), 0);
    }

    #[test]
    fn test_columns_preserve_header_order() {
        let row = named_row();
        let pairs: Vec<_> = row.columns().collect();
        assert_eq!(
            pairs,
            [("field1", "a"), ("field2", "b"), ("field3", "c")]
        );
    }

    #[test]
    fn test_duplicate_column_names_first_wins() {
        let row = Row::new(
            strings(&["a", "b"]),
            Some(Arc::new(strings(&["field", "field"]))),
        );
        assert_eq!(row.get_by_name("field"), Some("a"));
    }

    #[test]
    fn test_into_fields() {
        let row = named_row();
        assert_eq!(row.into_fields(), strings(&["a", "b", "c"]));
    }

    #[test]
    #[should_panic(expected = "no column named")]
    fn test_index_by_missing_name_panics() {
        let row = named_row();
        let _ = &row["missing"];
    }
}
