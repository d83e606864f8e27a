//! Entries for new submissions.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{IngestError, Result};
use crate::headers::ResolvedHeaders;
use crate::tsv::{TsvReader, TsvRow};

use super::stream::{EntryStream, RowBuilder};
use super::types::MetadataEntry;
use super::{collect_metadata, read_fasta_ids};

/// Lazy sequence of [`MetadataEntry`] values.
pub type MetadataEntries<R> = EntryStream<R, SubmissionBuilder>;

/// Reads the header row of `reader` and returns a lazy sequence of new-submission entries.
///
/// Header problems are reported here, before any data row is read.
///
/// # Errors
///
/// - [`IngestError::HeaderMissing`] if no submission identifier header exists
/// - [`IngestError::HeaderAmbiguous`] if both identifier spellings exist
/// - [`IngestError::Tsv`] if the header row cannot be decoded
pub fn metadata_entries<R: Read>(
    reader: R,
    include_fasta_ids: bool,
) -> Result<MetadataEntries<R>> {
    MetadataEntries::from_tsv(TsvReader::new(reader)?, include_fasta_ids)
}

impl<R: Read> EntryStream<R, SubmissionBuilder> {
    /// Builds the sequence from an already opened TSV reader.
    pub fn from_tsv(reader: TsvReader<R>, include_fasta_ids: bool) -> Result<Self> {
        let headers = ResolvedHeaders::for_submission(reader.headers().names())?;
        tracing::debug!(
            submission = headers.submission,
            fasta_id = headers.fasta_id,
            include_fasta_ids,
            "Resolved submission headers"
        );
        Ok(Self::new(
            reader,
            SubmissionBuilder::new(headers, include_fasta_ids),
        ))
    }
}

impl EntryStream<File, SubmissionBuilder> {
    /// Opens a metadata file of a new submission.
    pub fn from_path(path: &Path, include_fasta_ids: bool) -> Result<Self> {
        Self::from_tsv(TsvReader::from_path(path)?, include_fasta_ids)
    }
}

/// Validates rows of a new submission.
#[derive(Debug, Clone)]
pub struct SubmissionBuilder {
    headers: ResolvedHeaders,
    include_fasta_ids: bool,
}

impl SubmissionBuilder {
    /// Creates a new-submission builder routing on `headers`.
    ///
    /// With `include_fasta_ids`, every row must carry fasta ids.
    pub fn new(headers: ResolvedHeaders, include_fasta_ids: bool) -> Self {
        Self {
            headers,
            include_fasta_ids,
        }
    }
}

impl RowBuilder for SubmissionBuilder {
    type Entry = MetadataEntry;

    fn build(&self, row: &TsvRow) -> Result<MetadataEntry> {
        let submission_id = row.get_non_empty(self.headers.submission).ok_or_else(|| {
            IngestError::RowMissingIdentifier {
                row: row.number(),
                header: self.headers.submission.to_string(),
                content: row.to_string(),
            }
        })?;

        // Identifiers are routing keys downstream.
        if submission_id.chars().any(char::is_whitespace) {
            return Err(IngestError::RowIdentifierHasWhitespace {
                row: row.number(),
                submission_id: submission_id.to_string(),
                content: row.to_string(),
            });
        }

        let fasta_ids = if self.include_fasta_ids {
            Some(read_fasta_ids(row, &self.headers)?)
        } else {
            None
        };

        let metadata = collect_metadata(row, &self.headers, self.include_fasta_ids);
        if metadata.is_empty() {
            return Err(IngestError::RowEmptyMetadata {
                row: row.number(),
                submission_id: submission_id.to_string(),
                content: row.to_string(),
            });
        }

        Ok(MetadataEntry {
            submission_id: submission_id.to_string(),
            metadata,
            fasta_ids,
        })
    }

    fn headers(&self) -> &ResolvedHeaders {
        &self.headers
    }
}
