//! Error types for submission metadata ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a submission metadata file.
///
/// Every variant is fatal: the submission attempt is rejected as a whole.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Header Errors ===
    /// None of the accepted spellings of a required header is present.
    #[error("required header '{header}' not found{}", accepted_hint(.accepted))]
    HeaderMissing {
        header: String,
        accepted: Vec<String>,
    },

    /// More than one spelling of the submission identifier header is present.
    #[error(
        "ambiguous submission identifier header: found {}, only one may be present",
        quoted(.found, " and ")
    )]
    HeaderAmbiguous { found: Vec<String> },

    // === Row Errors ===
    /// The submission identifier value is absent or empty.
    #[error("row {row}: missing value for '{header}' in row: {content}")]
    RowMissingIdentifier {
        row: u64,
        header: String,
        content: String,
    },

    /// The submission identifier contains whitespace.
    #[error(
        "row {row}: submission identifier '{submission_id}' must not contain whitespace in row: {content}"
    )]
    RowIdentifierHasWhitespace {
        row: u64,
        submission_id: String,
        content: String,
    },

    /// The accession value of a revision row is absent or empty.
    #[error("row {row}: missing value for '{header}' in row: {content}")]
    RowMissingAccession {
        row: u64,
        header: String,
        content: String,
    },

    /// The fasta id value is absent or empty although linkage was requested.
    #[error("row {row}: missing value for '{header}' in row: {content}")]
    RowMissingFastaId {
        row: u64,
        header: String,
        content: String,
    },

    /// Nothing is left once the routing columns are removed.
    #[error("row {row}: no metadata found for submission '{submission_id}' in row: {content}")]
    RowEmptyMetadata {
        row: u64,
        submission_id: String,
        content: String,
    },

    /// A value runs across a line break, usually because a quote was never closed.
    #[error(
        "row {row} (line {line}): value spans more than one line, check for an unbalanced quote in row: {content}"
    )]
    RowSpansLines { row: u64, line: u64, content: String },

    // === Decoder Errors ===
    /// The underlying TSV decoder failed (I/O or invalid UTF-8).
    #[error("failed to read TSV: {0}")]
    Tsv(#[from] csv::Error),

    // === File System Errors ===
    /// Metadata file not found.
    #[error("metadata file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open the metadata file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Returns true for structural errors raised before any row is read.
    pub fn is_header_error(&self) -> bool {
        matches!(
            self,
            Self::HeaderMissing { .. } | Self::HeaderAmbiguous { .. }
        )
    }

    /// Returns the 1-based data row number for row-level errors.
    pub fn row(&self) -> Option<u64> {
        match self {
            Self::RowMissingIdentifier { row, .. }
            | Self::RowIdentifierHasWhitespace { row, .. }
            | Self::RowMissingAccession { row, .. }
            | Self::RowMissingFastaId { row, .. }
            | Self::RowEmptyMetadata { row, .. }
            | Self::RowSpansLines { row, .. } => Some(*row),
            _ => None,
        }
    }
}

fn quoted(names: &[String], separator: &str) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(separator)
}

fn accepted_hint(accepted: &[String]) -> String {
    if accepted.len() > 1 {
        format!(" (accepted spellings: {})", quoted(accepted, ", "))
    } else {
        String::new()
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
