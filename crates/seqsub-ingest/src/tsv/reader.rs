//! Forward-only TSV reading on top of the `csv` crate.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{IngestError, Result};

use super::row::TsvRow;

/// Header names of a TSV file, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsvHeaders {
    names: Vec<String>,
}

impl TsvHeaders {
    fn from_record(record: &StringRecord) -> Self {
        let names = record
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                if idx == 0 {
                    name.trim_start_matches('\u{feff}').to_string()
                } else {
                    name.to_string()
                }
            })
            .collect();
        Self { names }
    }

    /// Returns the header names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns true if a column named exactly `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|h| h == name)
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the header row is empty or missing.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Row cursor over tab-separated input.
///
/// The first line is the header row. Data rows are decoded one at a time into
/// a reused record buffer, so memory stays bounded by the widest row.
pub struct TsvReader<R> {
    inner: csv::Reader<R>,
    headers: TsvHeaders,
    record: StringRecord,
    rows_read: u64,
}

impl<R: Read> TsvReader<R> {
    /// Wraps `reader` and decodes the header row.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Tsv`] if the header row cannot be decoded.
    pub fn new(reader: R) -> Result<Self> {
        let mut inner = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = TsvHeaders::from_record(inner.headers()?);

        tracing::debug!(columns = headers.len(), "Read TSV header row");

        Ok(Self {
            inner,
            headers,
            record: StringRecord::new(),
            rows_read: 0,
        })
    }

    /// Returns the header row.
    pub fn headers(&self) -> &TsvHeaders {
        &self.headers
    }

    /// Returns the number of data rows read so far.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Reads the next data row.
    ///
    /// Returns `None` once the input is exhausted. Values beyond the header
    /// width are dropped; columns missing from a short row are absent.
    pub fn next_row(&mut self) -> Option<Result<TsvRow>> {
        match self.inner.read_record(&mut self.record) {
            Ok(true) => {
                self.rows_read += 1;
                let fields = self
                    .headers
                    .names
                    .iter()
                    .zip(self.record.iter())
                    .map(|(name, value)| (name.clone(), value.to_string()))
                    .collect();
                let row = TsvRow::new(self.rows_read, fields);
                // One record per physical line; a line break inside a value
                // means quoting swallowed the rows that follow.
                if self.record.iter().any(|value| value.contains(['\n', '\r'])) {
                    let line = self.record.position().map_or(0, csv::Position::line);
                    return Some(Err(IngestError::RowSpansLines {
                        row: self.rows_read,
                        line,
                        content: row.to_string(),
                    }));
                }
                Some(Ok(row))
            }
            Ok(false) => None,
            Err(err) => Some(Err(IngestError::Tsv(err))),
        }
    }
}

impl TsvReader<File> {
    /// Opens a TSV file.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::FileNotFound`] or [`IngestError::FileRead`] if
    /// the file cannot be opened, and [`IngestError::Tsv`] if the header row
    /// cannot be decoded.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::new(file)
    }
}

impl<R: Read> Iterator for TsvReader<R> {
    type Item = Result<TsvRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row()
    }
}
