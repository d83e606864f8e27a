//! A single data row of a TSV file.

use std::fmt;

/// One data row, as ordered `(header, value)` pairs.
///
/// Columns missing from a short row are absent rather than empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvRow {
    number: u64,
    fields: Vec<(String, String)>,
}

impl TsvRow {
    pub(crate) fn new(number: u64, fields: Vec<(String, String)>) -> Self {
        Self { number, fields }
    }

    /// Returns the 1-based data row number (the header row is not counted).
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Returns the raw value of `column`, if the row has one.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the value of `column` unless it is absent or empty.
    pub fn get_non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|value| !value.is_empty())
    }

    /// Iterates over `(header, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of values in this row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the row has no values.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for TsvRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (name, value)) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
